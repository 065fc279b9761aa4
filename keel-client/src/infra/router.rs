use keel_contracts::Router;
use keel_model::Route;
use parking_lot::Mutex;

/// Router for headless hosts: remembers where the screen asked to go.
#[derive(Debug, Default)]
pub struct LoggingRouter {
    history: Mutex<Vec<Route>>,
}

impl LoggingRouter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last_route(&self) -> Option<Route> {
        self.history.lock().last().copied()
    }
}

impl Router for LoggingRouter {
    fn redirect_to(&self, route: Route) {
        log::info!("[Router] Redirect to {}", route);
        self.history.lock().push(route);
    }
}

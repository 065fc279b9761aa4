use keel_model::Route;

/// Navigation sink. Redirecting to the route already shown must be harmless.
pub trait Router: Send + Sync {
    fn redirect_to(&self, route: Route);
}

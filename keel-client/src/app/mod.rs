pub mod runtime;

pub use runtime::ProfileRuntime;

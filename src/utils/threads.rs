use std::thread::{Builder, JoinHandle};

/// Spawns a thread with a name visible in panics and debuggers.
pub fn spawn_named_thread<F, T>(name: impl Into<String>, f: F) -> JoinHandle<T>
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    Builder::new()
        .name(name.into())
        .spawn(f)
        .expect("thread config should be valid")
}

use std::sync::{Arc, OnceLock};

use arc_swap::ArcSwapOption;

use crate::source::{system, MemorySource, SystemSource};

// arc-swap cannot hold `Arc<dyn Trait>` directly, so the installed source
// lives behind one extra indirection.
struct Installed {
    source: Arc<dyn MemorySource>,
}

static DEFAULT: ArcSwapOption<Installed> = ArcSwapOption::const_empty();

fn shared_system() -> Arc<dyn MemorySource> {
    static SHARED: OnceLock<Arc<SystemSource>> = OnceLock::new();
    let shared: Arc<SystemSource> = Arc::clone(SHARED.get_or_init(|| Arc::new(*system())));
    shared
}

/// The process-wide default source.
///
/// Returns the shared [`SystemSource`] until something else is installed
/// with [`set_default_source`] or [`install_default`]. Code that can take a
/// source parameter should prefer it over this ambient default; the default
/// exists for call sites that cannot.
pub fn default_source() -> Arc<dyn MemorySource> {
    match DEFAULT.load_full() {
        Some(installed) => Arc::clone(&installed.source),
        None => shared_system(),
    }
}

/// Installs `source` as the process-wide default, returning the previous
/// default.
///
/// The caller is responsible for restoring the previous default if the new
/// one is scoped; [`install_default`] does that automatically.
pub fn set_default_source(source: Arc<dyn MemorySource>) -> Arc<dyn MemorySource> {
    match DEFAULT.swap(Some(Arc::new(Installed { source }))) {
        Some(installed) => Arc::clone(&installed.source),
        None => shared_system(),
    }
}

/// Installs `source` for a scope.
///
/// Dropping the returned guard restores whatever default was installed
/// before, including "nothing", in which case [`default_source`] falls back
/// to the system heap again.
pub fn install_default(source: Arc<dyn MemorySource>) -> DefaultSourceGuard {
    DefaultSourceGuard {
        prev: DEFAULT.swap(Some(Arc::new(Installed { source }))),
    }
}

/// Restores the previously installed default source on drop.
#[must_use = "dropping the guard immediately restores the previous default"]
pub struct DefaultSourceGuard {
    prev: Option<Arc<Installed>>,
}

impl Drop for DefaultSourceGuard {
    fn drop(&mut self) {
        DEFAULT.store(self.prev.take());
    }
}

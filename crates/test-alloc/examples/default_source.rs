//! Installs a tap as the process-wide default source for a scope and
//! allocates a buffer through it.

use std::alloc::Layout;
use std::sync::Arc;

use alloctap::{default_source, install_default, system, SourceBuf, TapSource};

fn main() {
    let _guard = install_default(Arc::new(TapSource::new(system())));

    let source = default_source();
    let layout = Layout::from_size_align(64, 16).expect("valid layout");
    let mut buf = SourceBuf::zeroed(&*source, layout).expect("allocation failed");
    buf.as_mut_slice().fill(0x2a);

    println!("allocated {} bytes through the default source", buf.len());
}

//! Installs the tap process-wide and lets a plain `Vec` log its growth
//! allocations, one record per capacity step on stderr.

use alloctap::TapAlloc;

#[global_allocator]
static GLOBAL: TapAlloc = TapAlloc::system();

fn main() {
    println!("vec<i32> testing...");

    let mut ints = Vec::new();
    ints.push(42);
    ints.push(1729);

    println!("sum: {}", ints.iter().sum::<i32>());
}

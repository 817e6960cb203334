//! Binary entry point for the `zv0` code analyzer.
//!
//! Delegates to `entry_point::run_with_args()` so the library and the binary
//! behave the same.

use anyhow::Result;

fn main() -> Result<()> {
    let code = zv0::entry_point::run_with_args(std::env::args().skip(1).collect())?;
    std::process::exit(code);
}

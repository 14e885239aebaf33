use crate::output::banner;

pub fn execute() {
    banner::print_version_block(env!("CARGO_PKG_VERSION"));
}

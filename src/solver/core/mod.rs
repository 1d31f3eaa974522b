// package together all of the following and re-export
// in a partially flattened structure :
// : the method trait
// : the shared workspace and operation requests
// : user settings
// : main solver implementation

pub mod traits;

//partially flatten top level pieces

mod context;
mod info_print;
mod settings;
mod solver;
pub use context::*;
pub use settings::*;
pub use solver::*;

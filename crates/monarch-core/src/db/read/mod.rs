mod bind;
mod execute;
mod iterate;
mod materialize;
mod reader;


// public exports
pub use execute::ReadSource;
pub use reader::ObjectReader;

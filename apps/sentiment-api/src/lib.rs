pub mod bootstrap;
pub mod headless;
pub mod http;
pub mod obs;

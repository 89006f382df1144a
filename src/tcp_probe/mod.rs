pub mod probe;
pub mod result;

pub mod prelude {
    pub use super::probe::check_connect;
    pub use super::result::SocketResult;
}

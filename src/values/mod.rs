pub mod decimal;
pub mod impls;
pub mod shape;

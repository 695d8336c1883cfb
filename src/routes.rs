pub mod crud;
pub mod index;
pub mod sse;

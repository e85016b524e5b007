pub mod delay_window;
pub mod error;
pub mod modulus_engine;

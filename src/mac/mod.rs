// SHA-1 based MAC tools
mod sha1;

pub use sha1::*;

// MD4 based MAC tools
mod md4;

pub use md4::*;

/// Module implement AES-128-CTR editing oracle
pub mod edit;

/// Module implementing AES-128-CTR bitflipping oracle
pub mod bitflip;

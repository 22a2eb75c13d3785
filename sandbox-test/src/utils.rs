use alloy::primitives::{Address, U256};
use rand::{
    distributions::{Distribution, Standard},
    thread_rng, Rng,
};

/// Generate a random vector.
pub fn random_vector<T>(size: usize) -> Vec<T>
where
    Standard: Distribution<T>,
{
    (0..size).map(|_| thread_rng().gen::<T>()).collect()
}

/// A random 256-bit value, the way offer ids are drawn by the auction tests.
pub fn random_u256() -> U256 {
    U256::from_be_bytes(thread_rng().gen::<[u8; 32]>())
}

pub fn random_address() -> Address {
    Address::from(thread_rng().gen::<[u8; 20]>())
}

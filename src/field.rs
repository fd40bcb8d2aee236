//! BLS12-381 Scalar Field
//!
//! Every wire value and every coefficient of the constraint system lives in the
//! scalar field Fr of BLS12-381. The arithmetic itself comes from arkworks; this
//! module only adds the conversions the circuit builder needs (canonical limbs,
//! bit access, hex display).

use ark_bls12_381::Fr as ArkFr;
use ark_ff::{AdditiveGroup, BigInt, BigInteger, Field, One, PrimeField, Zero};
use ark_std::UniformRand;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::ops::{Add, AddAssign, Div, Mul, MulAssign, Neg, Sub, SubAssign};

/// An element of the BLS12-381 scalar field.
///
/// Field modulus r = 52435875175126190479447740508185965837690552500527637822603658699938581184513
/// Approximately 2^255 (255 bits)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Fr(pub ArkFr);

impl Fr {
    /// The field modulus as a hex string
    pub const MODULUS_HEX: &'static str =
        "73eda753299d7d483339d80809a1d80553bda402fffe5bfeffffffff00000001";

    /// Number of bits in the modulus
    pub const MODULUS_BITS: usize = 255;

    /// Number of 64-bit limbs in the canonical representation
    pub const NUM_LIMBS: usize = 4;

    /// Create from a u64
    pub fn from_u64(val: u64) -> Self {
        Fr(ArkFr::from(val))
    }

    /// Create from a u128
    pub fn from_u128(val: u128) -> Self {
        Fr(ArkFr::from(val))
    }

    /// Signed constructor, negative values wrap to r - |val|
    pub fn from_i64(val: i64) -> Self {
        if val >= 0 {
            Fr::from_u64(val as u64)
        } else {
            -Fr::from_u64(val.unsigned_abs())
        }
    }

    /// Additive identity
    pub fn zero() -> Self {
        Fr(ArkFr::zero())
    }

    /// Multiplicative identity
    pub fn one() -> Self {
        Fr(ArkFr::one())
    }

    /// Check if zero
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Check if one
    pub fn is_one(&self) -> bool {
        self.0.is_one()
    }

    /// Compute the multiplicative inverse (1/x)
    /// Returns None if x is zero
    pub fn inverse(&self) -> Option<Self> {
        self.0.inverse().map(Fr)
    }

    /// Compute x^n using square-and-multiply
    pub fn pow(&self, exp: u64) -> Self {
        let mut result = Fr::one();
        let mut base = *self;
        let mut e = exp;

        while e > 0 {
            if e & 1 == 1 {
                result = result * base;
            }
            base = base * base;
            e >>= 1;
        }
        result
    }

    /// Uniformly random element
    pub fn random<R: rand::Rng>(rng: &mut R) -> Self {
        Fr(ArkFr::rand(rng))
    }

    /// Double the element (2x)
    pub fn double(&self) -> Self {
        Fr(self.0.double())
    }

    /// Canonical representative in [0, r) as little-endian 64-bit limbs.
    pub fn to_limbs(&self) -> [u64; 4] {
        self.0.into_bigint().0
    }

    /// Bit `i` of the canonical representative (bit 0 = least significant).
    pub fn bit(&self, i: usize) -> bool {
        if i >= 64 * Self::NUM_LIMBS {
            return false;
        }
        let limbs = self.to_limbs();
        (limbs[i / 64] >> (i % 64)) & 1 == 1
    }

    /// Length in bits of the canonical representative; 0 for zero.
    pub fn num_bits(&self) -> usize {
        self.0.into_bigint().num_bits() as usize
    }

    /// Convert to bytes (little-endian)
    pub fn to_bytes(&self) -> [u8; 32] {
        let mut bytes = [0u8; 32];
        for (i, limb) in self.to_limbs().iter().enumerate() {
            bytes[i * 8..(i + 1) * 8].copy_from_slice(&limb.to_le_bytes());
        }
        bytes
    }

    /// Convert from bytes (little-endian). Fails on non-canonical input.
    pub fn from_bytes(bytes: &[u8; 32]) -> Option<Self> {
        let mut limbs = [0u64; 4];
        for (i, limb) in limbs.iter_mut().enumerate() {
            let mut limb_bytes = [0u8; 8];
            limb_bytes.copy_from_slice(&bytes[i * 8..(i + 1) * 8]);
            *limb = u64::from_le_bytes(limb_bytes);
        }
        ArkFr::from_bigint(BigInt::new(limbs)).map(Fr)
    }

    /// Convert to hex string (full 64 characters, big-endian)
    pub fn to_hex(&self) -> String {
        let mut be_bytes = self.to_bytes();
        be_bytes.reverse();
        format!("0x{}", hex::encode(be_bytes))
    }

    /// Short form used when rendering gates: small values print in decimal,
    /// small negatives as `-k`, everything else as truncated hex.
    pub fn to_short_hex(&self) -> String {
        let limbs = self.to_limbs();
        if limbs[1..].iter().all(|&l| l == 0) {
            return limbs[0].to_string();
        }
        let negated = (-*self).to_limbs();
        if negated[1..].iter().all(|&l| l == 0) {
            return format!("-{}", negated[0]);
        }
        let full = self.to_hex();
        format!("{}...{}", &full[..10], &full[full.len() - 8..])
    }

    /// Parse from hex string (big-endian, optional `0x`, up to 64 digits)
    pub fn from_hex(s: &str) -> Option<Self> {
        let s = s.strip_prefix("0x").unwrap_or(s);
        if s.len() > 64 {
            return None;
        }
        let padded = format!("{:0>64}", s);
        let bytes = hex::decode(padded).ok()?;
        let mut arr = [0u8; 32];
        arr.copy_from_slice(&bytes);
        arr.reverse();
        Self::from_bytes(&arr)
    }
}

impl Add for Fr {
    type Output = Fr;
    fn add(self, rhs: Fr) -> Fr {
        Fr(self.0 + rhs.0)
    }
}

impl Sub for Fr {
    type Output = Fr;
    fn sub(self, rhs: Fr) -> Fr {
        Fr(self.0 - rhs.0)
    }
}

impl Mul for Fr {
    type Output = Fr;
    fn mul(self, rhs: Fr) -> Fr {
        Fr(self.0 * rhs.0)
    }
}

impl Div for Fr {
    type Output = Fr;
    fn div(self, rhs: Fr) -> Fr {
        Fr(self.0 / rhs.0)
    }
}

impl Neg for Fr {
    type Output = Fr;
    fn neg(self) -> Fr {
        Fr(-self.0)
    }
}

impl AddAssign for Fr {
    fn add_assign(&mut self, rhs: Fr) {
        self.0 += rhs.0;
    }
}

impl SubAssign for Fr {
    fn sub_assign(&mut self, rhs: Fr) {
        self.0 -= rhs.0;
    }
}

impl MulAssign for Fr {
    fn mul_assign(&mut self, rhs: Fr) {
        self.0 *= rhs.0;
    }
}

impl From<u64> for Fr {
    fn from(val: u64) -> Self {
        Fr::from_u64(val)
    }
}

impl From<u128> for Fr {
    fn from(val: u128) -> Self {
        Fr::from_u128(val)
    }
}

impl From<i32> for Fr {
    fn from(val: i32) -> Self {
        Fr::from_i64(val as i64)
    }
}

impl From<i64> for Fr {
    fn from(val: i64) -> Self {
        Fr::from_i64(val)
    }
}

impl Default for Fr {
    fn default() -> Self {
        Fr::zero()
    }
}

// Serialized as the full big-endian hex string.
impl Serialize for Fr {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Fr {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Fr::from_hex(&s).ok_or_else(|| serde::de::Error::custom("Invalid field element hex"))
    }
}

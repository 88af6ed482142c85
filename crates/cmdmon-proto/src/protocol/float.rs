//! Compact 32-bit floating-point encoding used in report payloads.
//!
//! ```ignore
//!  0                   1                   2                   3
//!  0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |  Exponent   |                  Coefficient                    |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! ```
//!
//! Both parts are two's complement. The value is
//! `coefficient * 2^(exponent - 25)`.

/// Width of the exponent in bits.
pub const EXP_BITS: u32 = 7;

/// Width of the coefficient in bits.
pub const COEF_BITS: u32 = 32 - EXP_BITS;

const EXP_MIN: i32 = -(1 << (EXP_BITS - 1));
const EXP_MAX: i32 = -EXP_MIN - 1;
const COEF_MIN: i32 = -(1 << (COEF_BITS - 1));
const COEF_MAX: i32 = -COEF_MIN - 1;

/// Decode a compact float from its host-order 32-bit representation.
pub fn decode(x: u32) -> f64 {
    let mut exp = (x >> COEF_BITS) as i32;
    if exp >= 1 << (EXP_BITS - 1) {
        exp -= 1 << EXP_BITS;
    }
    exp -= COEF_BITS as i32;

    let mut coef = (x % (1 << COEF_BITS)) as i32;
    if coef >= 1 << (COEF_BITS - 1) {
        coef -= 1 << COEF_BITS;
    }

    f64::from(coef) * pow2(exp)
}

/// Encode a value as a compact float in host order.
///
/// NaN and magnitudes below 1e-100 encode as zero. Magnitudes above 1e100, and
/// anything whose exponent does not fit, saturate at the largest
/// representable value of the same sign.
pub fn encode(x: f64) -> u32 {
    let (x, neg) = if x < 0.0 {
        (-x, 1)
    } else if x >= 0.0 {
        (x, 0)
    } else {
        (0.0, 0)
    };

    let (exp, mut coef) = if x < 1.0e-100 {
        (0, 0)
    } else if x > 1.0e100 {
        (EXP_MAX, COEF_MAX + neg)
    } else {
        let mut exp = log2_plus_one(x);
        let mut coef = (x * pow2(COEF_BITS as i32 - exp) + 0.5) as i32;

        while coef > COEF_MAX + neg {
            coef >>= 1;
            exp += 1;
        }

        if exp > EXP_MAX {
            (EXP_MAX, COEF_MAX + neg)
        } else if exp < EXP_MIN {
            if exp + COEF_BITS as i32 >= EXP_MIN {
                (EXP_MIN, coef >> (EXP_MIN - exp))
            } else {
                (0, 0)
            }
        } else {
            (exp, coef)
        }
    };

    if neg == 1 {
        coef = ((coef.wrapping_neg() as u32) << EXP_BITS >> EXP_BITS) as i32;
    }

    (exp as u32) << COEF_BITS | coef as u32
}

/// `2^n` without relying on a math library.
fn pow2(n: i32) -> f64 {
    if (-1022..=1023).contains(&n) {
        f64::from_bits(((n + 1023) as u64) << 52)
    } else {
        let half = n / 2;
        pow2(half) * pow2(n - half)
    }
}

/// `log2(x) + 1` truncated toward zero, for finite normal `x > 0`.
fn log2_plus_one(x: f64) -> i32 {
    let bits = x.to_bits();
    let e = ((bits >> 52) & 0x7ff) as i32 - 1023;
    let exact = bits & ((1 << 52) - 1) == 0;
    if e + 1 >= 0 || exact { e + 1 } else { e + 2 }
}

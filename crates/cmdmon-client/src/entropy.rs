// Copyright 2026 U.S. Federal Government (in countries where recognized)
// SPDX-License-Identifier: Apache-2.0

//! Source of unpredictable bytes for sequence numbers and socket paths.

use std::io;

use rand::TryRngCore;
use rand::rngs::OsRng;

/// A fallible source of random bytes.
///
/// Sessions draw request sequence numbers from it and the socket bootstrap
/// draws directory names from it. Tests substitute deterministic or failing
/// implementations.
pub trait Entropy {
    /// Fill `buf` entirely with random bytes.
    fn fill(&mut self, buf: &mut [u8]) -> io::Result<()>;
}

/// The operating system's random source.
#[derive(Clone, Copy, Debug, Default)]
pub struct OsEntropy;

impl Entropy for OsEntropy {
    fn fill(&mut self, buf: &mut [u8]) -> io::Result<()> {
        OsRng.try_fill_bytes(buf).map_err(io::Error::other)
    }
}

impl<E: Entropy + ?Sized> Entropy for &mut E {
    fn fill(&mut self, buf: &mut [u8]) -> io::Result<()> {
        (**self).fill(buf)
    }
}

impl<E: Entropy + ?Sized> Entropy for Box<E> {
    fn fill(&mut self, buf: &mut [u8]) -> io::Result<()> {
        (**self).fill(buf)
    }
}

/// Draw a 32-bit value.
pub(crate) fn random_u32<E: Entropy + ?Sized>(entropy: &mut E) -> io::Result<u32> {
    let mut buf = [0u8; 4];
    entropy.fill(&mut buf)?;
    Ok(u32::from_ne_bytes(buf))
}

/// Draw a string of `len` ASCII letters and digits.
///
/// Bytes outside that set are discarded rather than mapped, so every
/// character is uniformly distributed.
pub(crate) fn random_alphanumeric<E: Entropy + ?Sized>(
    entropy: &mut E,
    len: usize,
) -> io::Result<String> {
    let mut name = String::with_capacity(len);
    let mut chunk = [0u8; 32];
    while name.len() < len {
        entropy.fill(&mut chunk)?;
        for &b in chunk.iter().filter(|b| b.is_ascii_alphanumeric()) {
            if name.len() == len {
                break;
            }
            name.push(char::from(b));
        }
    }
    Ok(name)
}

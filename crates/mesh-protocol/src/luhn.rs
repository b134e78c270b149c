//! Luhn mod 32 check characters over the base32 alphabet.

use crate::{Error, Result};

const ALPHABET: &[u8; 32] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ234567";

/// Characters per checked group, excluding the check character.
const GROUP: usize = 13;

fn codepoint(ch: u8) -> Result<usize> {
    ALPHABET
        .iter()
        .position(|&c| c == ch)
        .ok_or(Error::InvalidCharacter { ch: ch as char })
}

/// Compute the check character for `group`.
pub(crate) fn check_char(group: &[u8]) -> Result<u8> {
    let n = ALPHABET.len();
    let mut factor = 1;
    let mut sum = 0;
    for &ch in group {
        let addend = factor * codepoint(ch)?;
        factor = if factor == 2 { 1 } else { 2 };
        sum += addend / n + addend % n;
    }
    let check = (n - sum % n) % n;
    Ok(ALPHABET[check])
}

/// Append a check character to each 13-character group of a 52-character string.
pub(crate) fn luhnify(plain: &str) -> Result<String> {
    if plain.len() != 4 * GROUP {
        return Err(Error::InvalidLength { len: plain.len() });
    }
    let mut out = String::with_capacity(4 * (GROUP + 1));
    for group in plain.as_bytes().chunks(GROUP) {
        let check = check_char(group)?;
        // Alphabet members only, so this is ASCII.
        out.extend(group.iter().map(|&b| b as char));
        out.push(check as char);
    }
    Ok(out)
}

/// Verify and strip the check characters from a 56-character string.
pub(crate) fn unluhnify(checked: &str) -> Result<String> {
    if checked.len() != 4 * (GROUP + 1) {
        return Err(Error::InvalidLength { len: checked.len() });
    }
    let mut out = String::with_capacity(4 * GROUP);
    for chunk in checked.as_bytes().chunks(GROUP + 1) {
        let (group, check) = chunk.split_at(GROUP);
        if check_char(group)? != check[0] {
            return Err(Error::CheckMismatch {
                group: String::from_utf8_lossy(chunk).into_owned(),
            });
        }
        out.extend(group.iter().map(|&b| b as char));
    }
    Ok(out)
}

/// Split into 7-character chunks joined by dashes.
pub(crate) fn chunkify(s: &str) -> String {
    s.as_bytes()
        .chunks(7)
        .map(|c| String::from_utf8_lossy(c))
        .collect::<Vec<_>>()
        .join("-")
}

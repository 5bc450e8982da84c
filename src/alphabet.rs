/// The IUPAC DNA letters plus the gap symbol, in canonical order.
pub const DNA_IUPAC_LETTERS: &[u8; 16] = b"ACGTRYSWKMBDHVN-";

/// Complement of each letter in [`DNA_IUPAC_LETTERS`], position for position.
const DNA_IUPAC_COMPLEMENTS: &[u8; 16] = b"TGCAYRSWMKVHDBN-";

const fn build_valid_lookup() -> [bool; 256] {
    let mut l = [false; 256];
    let mut i = 0;
    while i < DNA_IUPAC_LETTERS.len() {
        l[DNA_IUPAC_LETTERS[i] as usize] = true;
        i += 1;
    }
    l
}

const fn build_complement_lookup() -> [u8; 256] {
    // 0 marks "not in the alphabet"
    let mut l = [0u8; 256];
    let mut i = 0;
    while i < DNA_IUPAC_LETTERS.len() {
        l[DNA_IUPAC_LETTERS[i] as usize] = DNA_IUPAC_COMPLEMENTS[i];
        i += 1;
    }
    l
}

static VALID_LOOKUP: [bool; 256] = build_valid_lookup();
static COMPLEMENT_LOOKUP: [u8; 256] = build_complement_lookup();

/// Returns true if `b` is an uppercase member of the alphabet.
#[inline(always)]
pub fn is_valid(b: u8) -> bool {
    VALID_LOOKUP[b as usize]
}

/// Uppercases `b` and checks it against the alphabet.
///
/// Returns the normalized byte, or `Err` carrying the uppercased byte when it
/// is not a member.
#[inline(always)]
pub fn normalize(b: u8) -> Result<u8, u8> {
    let upper = b.to_ascii_uppercase();
    if is_valid(upper) {
        Ok(upper)
    } else {
        Err(upper)
    }
}

/// Normalizes a whole string into a fresh buffer.
///
/// On failure, returns the first offending character after ASCII uppercasing.
/// Non-ASCII characters are never members and are reported unchanged, not
/// Unicode-uppercased (`é` stays `é`, not `É`).
pub fn normalize_str(s: &str) -> Result<Vec<u8>, char> {
    let mut out = Vec::with_capacity(s.len());
    normalize_str_into(s, &mut out)?;
    Ok(out)
}

/// Like [`normalize_str`], but appends to an existing buffer. The buffer is
/// left partially written on failure.
pub fn normalize_str_into(s: &str, out: &mut Vec<u8>) -> Result<(), char> {
    for c in s.chars() {
        if !c.is_ascii() {
            return Err(c);
        }
        match normalize(c as u8) {
            Ok(b) => out.push(b),
            Err(b) => return Err(b as char),
        }
    }
    Ok(())
}

/// Complement of a normalized byte. Bytes outside the alphabet map to
/// themselves.
#[inline(always)]
pub fn complement(b: u8) -> u8 {
    match COMPLEMENT_LOOKUP[b as usize] {
        0 => b,
        c => c,
    }
}

//! Small byte-slice combinators for the header grammar.

/// Expects the next byte to be `b`, consuming it. `None` on a mismatch or at
/// end of input.
pub fn expect(b: u8, bytes: &[u8]) -> Option<&[u8]> {
    match bytes.split_first() {
        Some((&a, rest)) if a == b => Some(rest),
        _ => None,
    }
}

/// Consumes any leading ascii whitespace.
pub fn take_ws(bytes: &[u8]) -> &[u8] {
    let (_, rest) = take_while(|b| b.is_ascii_whitespace(), bytes);

    rest
}

/// Splits off the longest prefix whose bytes satisfy `p`. The prefix may be
/// empty, and it runs to the end of the slice when `p` never fails.
pub fn take_while<P>(p: P, bytes: &[u8]) -> (&[u8], &[u8])
where
    P: Fn(u8) -> bool,
{
    let i = bytes.iter().position(|&b| !p(b)).unwrap_or(bytes.len());

    bytes.split_at(i)
}

/// Parses an ascii digit prefix as a `u32`. `None` when the prefix is empty
/// or overflows.
pub fn digits(bytes: &[u8]) -> Option<(u32, &[u8])> {
    let (prefix, rest) = take_while(|b| b.is_ascii_digit(), bytes);

    let mut n: u32 = 0;
    if prefix.is_empty() {
        return None;
    }

    for &b in prefix {
        n = n.checked_mul(10)?.checked_add(u32::from(b - b'0'))?;
    }

    Some((n, rest))
}

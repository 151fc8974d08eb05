use crate::validation::IbanError;

/// ISO 7064 numeral for a single IBAN character: digits map to themselves,
/// `A`..`Z` map to 10..35. Anything else has no value.
pub fn iso7064_value(ch: char) -> Option<u32> {
    match ch {
        '0'..='9' => Some(ch as u32 - '0' as u32),
        'A'..='Z' => Some(ch as u32 - 'A' as u32 + 10),
        _ => None,
    }
}

/// Remainder modulo 97 of the decimal numeral formed by concatenating the
/// ISO 7064 expansion of every character, folded one expansion at a time so
/// the numeral never has to be materialized.
pub fn mod97_remainder<I>(chars: I) -> Result<u32, IbanError>
where
    I: IntoIterator<Item = char>,
{
    let mut remainder: u32 = 0;
    for ch in chars {
        let value = iso7064_value(ch).ok_or(IbanError::IllegalCharacter(ch))?;
        let shift = if value < 10 { 10 } else { 100 };
        remainder = (remainder * shift + value) % 97;
    }
    Ok(remainder)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn digits_and_letters_expand() {
        assert_eq!(iso7064_value('0'), Some(0));
        assert_eq!(iso7064_value('9'), Some(9));
        assert_eq!(iso7064_value('A'), Some(10));
        assert_eq!(iso7064_value('W'), Some(32));
        assert_eq!(iso7064_value('Z'), Some(35));
    }

    #[test]
    fn other_characters_have_no_value() {
        for ch in ['a', 'z', ' ', '-', '/', 'É', '٣'] {
            assert_eq!(iso7064_value(ch), None, "{ch:?}");
        }
    }

    #[test]
    fn folding_matches_wide_integer_remainder() {
        // GB82 WEST 1234 5698 7654 32 rearranged, expanded to 3214282912345698765432161182
        let numeral: u128 = 3214282912345698765432161182;
        let folded = mod97_remainder("WEST12345698765432GB82".chars()).unwrap();
        assert_eq!(folded, (numeral % 97) as u32);
        assert_eq!(folded, 1);
    }

    #[test]
    fn folding_plain_digits() {
        assert_eq!(mod97_remainder("97".chars()).unwrap(), 0);
        assert_eq!(mod97_remainder("98".chars()).unwrap(), 1);
        assert_eq!(mod97_remainder("".chars()).unwrap(), 0);
        assert_eq!(
            mod97_remainder("123456789012345678".chars()).unwrap(),
            (123456789012345678u64 % 97) as u32
        );
    }

    #[test]
    fn letter_counts_as_two_digits() {
        // "1A" expands to "110"
        assert_eq!(mod97_remainder("1A".chars()).unwrap(), 110 % 97);
    }

    #[test]
    fn illegal_character_is_an_error_not_skipped() {
        assert_eq!(
            mod97_remainder("12-3".chars()),
            Err(IbanError::IllegalCharacter('-'))
        );
        assert_eq!(
            mod97_remainder("12a3".chars()),
            Err(IbanError::IllegalCharacter('a'))
        );
    }
}

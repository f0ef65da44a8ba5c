//! Edge case tests for yay-lex


#[cfg(test)]
mod proptests {
    use num_bigint::BigInt;
    use proptest::prelude::*;

    use crate::{Lexer, TokenKind};

    proptest! {
        #[test]
        fn decimal_integers_lex_exactly(n in any::<i64>()) {
            let tokens = Lexer::new(&n.to_string()).tokenize().unwrap();
            prop_assert_eq!(&tokens[1].kind, &TokenKind::Int(BigInt::from(n)));
        }

        #[test]
        fn single_quoted_text_is_literal(s in "[ !#-&(-~]{0,24}") {
            // No quotes, no control characters: the content survives as-is.
            let source = format!("'{}'", s);
            let tokens = Lexer::new(&source).tokenize().unwrap();
            prop_assert_eq!(&tokens[1].kind, &TokenKind::Str(s));
        }

        #[test]
        fn inline_bytes_lex_to_their_octets(bytes in proptest::collection::vec(any::<u8>(), 0..32)) {
            let hex: String = bytes.iter().map(|b| format!("{:02x}", b)).collect();
            let source = format!("<{}>", hex);
            let tokens = Lexer::new(&source).tokenize().unwrap();
            prop_assert_eq!(&tokens[1].kind, &TokenKind::Bytes(bytes));
        }
    }
}

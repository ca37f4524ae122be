// Integration tests for the expression pipeline

use calctty::parser::lexer::{Lexer, TokenKind};
use calctty::parser::parse::Parser;
use calctty::pipeline::{eval_str, run, trace, Input, Stage};

#[test]
fn test_digit_strings_round_trip() {
    for text in ["0", "7", "42", "007", "123456789", "9223372036854775807"] {
        let tokens = Lexer::new(text).tokenize().expect("Lexing failed");
        let significant: Vec<_> = tokens.iter().filter(|t| t.kind != TokenKind::Eof).collect();

        assert_eq!(significant.len(), 1, "{} should be one token", text);
        assert_eq!(significant[0].kind, TokenKind::Number(text.to_string()));

        let expected: i64 = text.parse().unwrap();
        assert_eq!(eval_str(text), Ok(expected));
    }
}

#[test]
fn test_whitespace_insensitivity() {
    let spaced = ["1+2", "1 + 2", " 1  +   2 ", "\t1\n+\r2\n"];
    for text in spaced {
        assert_eq!(eval_str(text), Ok(3), "{:?}", text);
    }

    let reference = Parser::new(&Lexer::new("1+2").tokenize().unwrap())
        .unwrap()
        .generate_ast()
        .unwrap();
    for text in spaced {
        let tokens = Lexer::new(text).tokenize().unwrap();
        let ast = Parser::new(&tokens).unwrap().generate_ast().unwrap();
        assert!(ast.same_shape(&reference), "{:?}", text);
    }
}

#[test]
fn test_precedence_and_associativity() {
    assert_eq!(eval_str("2+3*4"), Ok(14));
    assert_eq!(eval_str("8-3-2"), Ok(3));
    assert_eq!(eval_str("(2+3)*4"), Ok(20));
    assert_eq!(eval_str("6&3|8"), Ok(10));
    assert_eq!(eval_str("100/10/5"), Ok(2));
    assert_eq!(eval_str("1|2^3&4"), Ok(3));
    assert_eq!(eval_str("((((7))))"), Ok(7));
}

#[test]
fn test_zero_divisor_is_arithmetic_failure() {
    for text in ["5/0", "5%0", "1 + 5/(3-3)"] {
        let err = eval_str(text).unwrap_err();
        assert_eq!(err.stage(), Stage::Arithmetic, "{}", text);
    }
}

#[test]
fn test_malformed_input_is_parse_failure() {
    for text in ["(1+2", "*3", "1 2", "", "   ", "1 < 2", "x + 1", "3)"] {
        let err = eval_str(text).unwrap_err();
        assert_eq!(err.stage(), Stage::Parse, "{:?}", text);
    }
}

#[test]
fn test_bad_characters_are_lex_failure() {
    for text in ["1 # 2", "!", "2 @", "1 $ 1"] {
        let err = eval_str(text).unwrap_err();
        assert_eq!(err.stage(), Stage::Lex, "{:?}", text);
    }
}

#[test]
fn test_next_token_after_end_stays_eof() {
    let mut lexer = Lexer::new("1");
    assert!(matches!(lexer.next_token().unwrap().kind, TokenKind::Number(_)));
    for _ in 0..3 {
        assert_eq!(lexer.next_token().unwrap().kind, TokenKind::Eof);
    }
}

#[test]
fn test_lines_are_independent() {
    let first = trace(Input::Text("1 +"));
    assert!(first.result.is_err());

    let second = trace(Input::Text("2*3"));
    assert_eq!(second.result, Ok(6));
    assert_eq!(second.significant_tokens().count(), 4);
}

#[test]
fn test_stream_and_string_agree() {
    for text in ["2+3*4", "(1 | 6) & 3", "17 % 5 ^ 1"] {
        let from_stream = run(Input::Stream(Box::new(text.as_bytes())));
        assert_eq!(from_stream, eval_str(text), "{}", text);
    }
}

#[test]
fn test_deep_nesting_is_parse_failure() {
    let n = 10_000;
    let nested = format!("{}1{}", "(".repeat(n), ")".repeat(n));
    let err = eval_str(&nested).unwrap_err();
    assert_eq!(err.stage(), Stage::Parse);
    assert!(err.to_string().contains("nested too deeply"));

    let stream = run(Input::Stream(Box::new(nested.as_bytes())));
    assert_eq!(stream.unwrap_err().stage(), Stage::Parse);

    let chain = vec!["1"; 20_000].join("+");
    assert_eq!(eval_str(&chain).unwrap_err().stage(), Stage::Parse);

    assert_eq!(eval_str(&format!("{}1{}", "(".repeat(100), ")".repeat(100))), Ok(1));
    assert_eq!(eval_str(&vec!["1"; 400].join("+")), Ok(400));
}

#[test]
fn test_identifier_stops_before_digits() {
    let kinds: Vec<TokenKind> = Lexer::new("ab12")
        .tokenize()
        .unwrap()
        .into_iter()
        .map(|t| t.kind)
        .collect();
    assert_eq!(
        kinds,
        vec![
            TokenKind::Ident("ab".to_string()),
            TokenKind::Number("12".to_string()),
            TokenKind::Eof,
        ]
    );
}

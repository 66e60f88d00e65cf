use std::iter::Peekable;
use std::ops::Range;
use std::str::CharIndices;

use crate::parser::error::ParseError;

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Token {
    Ident(String),
    Str(String),
    /// A string literal that failed to lex; its error is already reported.
    Invalid,
    Semi,
}

/// Split program source into tokens with their byte spans.
///
/// Lexing never stops early: bad characters and malformed strings are
/// reported and skipped so the parser still sees the rest of the source.
pub(crate) fn tokenize(
    source: &str,
    file_id: usize,
) -> (Vec<(Token, Range<usize>)>, Vec<ParseError>) {
    let mut tokens = Vec::new();
    let mut errors = Vec::new();
    let mut chars = source.char_indices().peekable();

    while let Some(&(start, ch)) = chars.peek() {
        match ch {
            c if c.is_whitespace() => {
                chars.next();
            }
            ';' => {
                chars.next();
                tokens.push((Token::Semi, start..start + 1));
            }
            '/' if source[start..].starts_with("//") => {
                while let Some(&(_, c)) = chars.peek() {
                    if c == '\n' {
                        break;
                    }
                    chars.next();
                }
            }
            '"' => {
                chars.next();
                match lex_string(source, &mut chars, start, file_id) {
                    Ok((text, end)) => tokens.push((Token::Str(text), start..end)),
                    Err((e, end)) => {
                        tokens.push((Token::Invalid, start..end));
                        errors.push(e);
                    }
                }
            }
            c if c.is_ascii_alphabetic() || c == '_' => {
                let mut end = start;
                while let Some(&(i, c)) = chars.peek() {
                    if c.is_ascii_alphanumeric() || c == '_' {
                        end = i + c.len_utf8();
                        chars.next();
                    } else {
                        break;
                    }
                }
                tokens.push((Token::Ident(source[start..end].to_string()), start..end));
            }
            other => {
                chars.next();
                errors.push(ParseError::error(
                    format!("unexpected character `{}`", other),
                    start..start + other.len_utf8(),
                    file_id,
                ));
            }
        }
    }

    (tokens, errors)
}

/// Lex the body of a string literal whose opening quote sits at `start`.
/// Returns the unescaped text and the byte offset just past the closing quote.
/// On failure the offset is where lexing stopped, so the bad literal still
/// occupies a token.
fn lex_string(
    source: &str,
    chars: &mut Peekable<CharIndices<'_>>,
    start: usize,
    file_id: usize,
) -> Result<(String, usize), (ParseError, usize)> {
    let mut text = String::new();
    let mut bad_escape = None;

    while let Some((i, c)) = chars.next() {
        match c {
            '"' => {
                return match bad_escape {
                    Some(e) => Err((e, i + 1)),
                    None => Ok((text, i + 1)),
                };
            }
            '\\' => match chars.next() {
                Some((_, '"')) => text.push('"'),
                Some((_, '\\')) => text.push('\\'),
                Some((_, 'n')) => text.push('\n'),
                Some((_, 't')) => text.push('\t'),
                Some((j, other)) => {
                    bad_escape.get_or_insert_with(|| {
                        ParseError::error(
                            format!("unknown escape sequence `\\{}`", other),
                            i..j + other.len_utf8(),
                            file_id,
                        )
                        .with_note("supported escapes are \\\", \\\\, \\n and \\t")
                    });
                }
                None => break,
            },
            c => text.push(c),
        }
    }

    Err((
        ParseError::error("unterminated string literal", start..source.len(), file_id),
        source.len(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<Token> {
        let (tokens, errors) = tokenize(source, 0);
        assert!(errors.is_empty(), "unexpected errors: {:?}", errors);
        tokens.into_iter().map(|(t, _)| t).collect()
    }

    #[test]
    fn lexes_words_strings_and_separators() {
        assert_eq!(
            kinds(r#"print "a b"; halt"#),
            vec![
                Token::Ident("print".into()),
                Token::Str("a b".into()),
                Token::Semi,
                Token::Ident("halt".into()),
            ]
        );
    }

    #[test]
    fn string_spans_include_quotes() {
        let (tokens, _) = tokenize(r#"print "ab""#, 0);
        assert_eq!(tokens[1].1, 6..10);
    }

    #[test]
    fn skips_line_comments() {
        assert_eq!(
            kinds("skip // trailing\n// whole line\nhalt"),
            vec![Token::Ident("skip".into()), Token::Ident("halt".into())]
        );
    }

    #[test]
    fn keeps_unicode_in_strings() {
        assert_eq!(kinds("\"〈•〉\""), vec![Token::Str("〈•〉".into())]);
    }

    #[test]
    fn reports_unterminated_string() {
        let (tokens, errors) = tokenize("skip; print \"oops", 0);
        assert_eq!(tokens.len(), 4);
        assert_eq!(tokens[3], (Token::Invalid, 12..17));
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].message, "unterminated string literal");
        assert_eq!(errors[0].span, 12..17);
    }

    #[test]
    fn reports_unknown_escape() {
        let (tokens, errors) = tokenize(r#""a\qb""#, 0);
        assert_eq!(tokens, vec![(Token::Invalid, 0..6)]);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].span, 2..4);
    }

    #[test]
    fn reports_stray_characters() {
        let (tokens, errors) = tokenize("skip # halt", 0);
        assert_eq!(tokens.len(), 2);
        assert_eq!(errors[0].message, "unexpected character `#`");
    }
}

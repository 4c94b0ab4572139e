//! Lexical layer: `$`-chunk splitting and the quote-aware comma scanner
//! (spec §4.C).

/// Splits a request's decoded query string on `$`, dropping empty segments.
pub fn split_dollar_chunks(s: &str) -> Vec<&str> {
    s.split('$').filter(|c| !c.is_empty()).collect()
}

/// One `name(arg1,arg2,...)` chunk, split into its operator name and raw
/// (un-normalized) argument tokens. Missing `()` means no arguments.
pub struct Chunk<'a> {
    pub op: &'a str,
    pub args: Vec<&'a str>,
}

pub fn parse_chunk(chunk: &str) -> crate::error::Result<Chunk<'_>> {
    match chunk.find('(') {
        None => Ok(Chunk {
            op: chunk,
            args: Vec::new(),
        }),
        Some(open) => {
            if !chunk.ends_with(')') {
                return Err(crate::error::Error::parse(format!(
                    "unterminated argument list in chunk {chunk:?}"
                )));
            }
            let op = &chunk[..open];
            let inner = &chunk[open + 1..chunk.len() - 1];
            let args = if inner.is_empty() {
                Vec::new()
            } else {
                split_args(inner)
            };
            Ok(Chunk { op, args })
        }
    }
}

/// Quote-aware comma split: commas only separate arguments when not inside a
/// single-quoted run. Quote characters are retained in the returned tokens.
pub fn split_args(s: &str) -> Vec<&str> {
    let mut tokens = Vec::new();
    let mut quoted = false;
    let mut start = 0usize;
    for (i, c) in s.char_indices() {
        match c {
            '\'' => quoted = !quoted,
            ',' if !quoted => {
                tokens.push(&s[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    tokens.push(&s[start..]);
    tokens
}

/// Identifier normalization: strips a single matching pair of outer `'`
/// quotes; otherwise the token is kept verbatim.
pub fn trim_ident(token: &str) -> String {
    if token.len() >= 2 && token.starts_with('\'') && token.ends_with('\'') {
        token[1..token.len() - 1].to_string()
    } else {
        token.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_dollar_chunks_and_drops_empty() {
        assert_eq!(
            split_dollar_chunks("$sort(name asc)$$take(2)"),
            vec!["sort(name asc)", "take(2)"]
        );
    }

    #[test]
    fn parses_chunk_without_args() {
        let c = parse_chunk("metadata").unwrap();
        assert_eq!(c.op, "metadata");
        assert!(c.args.is_empty());
    }

    #[test]
    fn parses_chunk_with_args() {
        let c = parse_chunk("sort(name asc,age desc)").unwrap();
        assert_eq!(c.op, "sort");
        assert_eq!(c.args, vec!["name asc", "age desc"]);
    }

    #[test]
    fn quoted_commas_are_not_split_points() {
        let c = parse_chunk("filter('a, b' eq 1)").unwrap();
        assert_eq!(c.args, vec!["'a, b' eq 1"]);
    }

    #[test]
    fn trim_ident_strips_matching_quotes_only() {
        assert_eq!(trim_ident("'city'"), "city");
        assert_eq!(trim_ident("city"), "city");
        assert_eq!(trim_ident("'unterminated"), "'unterminated");
    }
}

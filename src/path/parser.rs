use nom::{
    IResult, Parser,
    branch::alt,
    bytes::complete::{take_while1, take_while_m_n},
    character::complete::char,
    combinator::{map, opt},
    error::{ErrorKind, ParseError, context},
    multi::{many0, separated_list0},
    sequence::preceded,
};
use nom_language::error::VerboseError;

use super::Segment;

// /example-jukebox:jukebox - allowed - module-qualified root segment
// /jukebox/library - allowed - child segments without a module prefix
// /playlist=Foo-One - allowed - list entry addressed by key value
// /song=3,side-a - allowed - multi-key list entry
// /interface=eth%2F0 - allowed - percent-escaped '/' inside a key value
// /artist=Bj%C3%B6rk - allowed - escaped octets assembling a multi-byte character
// /album= - allowed - empty key value (keys may be zero length)
// / - allowed - the target resource itself
// jukebox - not allowed - missing leading '/'
// /jukebox/ - not allowed - empty trailing segment
// //jukebox - not allowed - empty segment
// /:jukebox - not allowed - empty module prefix
// /jukebox=a=b - not allowed - raw '=' inside a key value
// /artist=%FF - not allowed - escape octets that are not valid UTF-8
pub(crate) fn parse_api_path(input: &str) -> IResult<&str, Vec<Segment>, VerboseError<&str>> {
    context(
        "expected an api-path starting with '/'",
        preceded(char('/'), separated_list0(char('/'), parse_segment)),
    )
    .parse(input)
}

fn parse_segment(input: &str) -> IResult<&str, Segment, VerboseError<&str>> {
    context("segment", |i| {
        let (rest, first) = parse_identifier(i)?;
        let (rest, name) = opt(preceded(char(':'), parse_identifier)).parse(rest)?;
        let (rest, keys) = opt(preceded(char('='), parse_key_values)).parse(rest)?;

        let (module, name) = match name {
            Some(name) => (Some(first.to_string()), name.to_string()),
            None => (None, first.to_string()),
        };

        let segment = Segment {
            module,
            name,
            keys: keys.unwrap_or_default(),
        };
        Ok((rest, segment))
    })
    .parse(input)
}

// identifier for module and node names
fn parse_identifier(input: &str) -> IResult<&str, &str, VerboseError<&str>> {
    let is_ident_char = |c: char| c.is_alphanumeric() || c == '_' || c == '-' || c == '.';
    take_while1(is_ident_char).parse(input)
}

// Key values may be empty anywhere in the list, so the list is built
// by hand instead of with separated_list (whose items must consume).
fn parse_key_values(input: &str) -> IResult<&str, Vec<String>, VerboseError<&str>> {
    let (rest, first) = parse_key_value(input)?;
    let (rest, mut keys) = many0(preceded(char(','), parse_key_value)).parse(rest)?;

    keys.insert(0, first);
    Ok((rest, keys))
}

fn parse_key_value(input: &str) -> IResult<&str, String, VerboseError<&str>> {
    // Decoded content of one key value, assembled as raw bytes.
    // - '/' and ',' delimit segments and keys, '=' starts the key list,
    //   so all three must travel percent-escaped.
    // - '%' always introduces an escape and yields one octet. A multi-byte
    //   character arrives as a run of escapes, so the collected bytes only
    //   become text once the whole value is decoded.
    let escaped = map(unescape_percent, |byte| vec![byte]);
    let plain = map(
        take_while1(|c: char| c != '/' && c != ',' && c != '=' && c != '%'),
        |run: &str| run.as_bytes().to_vec(),
    );

    let (rest, runs) = many0(alt((escaped, plain))).parse(input)?;
    match String::from_utf8(runs.concat()) {
        Ok(value) => Ok((rest, value)),
        Err(_) => Err(nom::Err::Error(VerboseError::from_error_kind(
            input,
            ErrorKind::Verify,
        ))),
    }
}

fn unescape_percent(input: &str) -> IResult<&str, u8, VerboseError<&str>> {
    let (rest, _) = char('%').parse(input)?;
    let (rest, hex) = take_while_m_n(2, 2, |c: char| c.is_ascii_hexdigit()).parse(rest)?;

    match u8::from_str_radix(hex, 16) {
        Ok(byte) => Ok((rest, byte)),
        Err(_) => Err(nom::Err::Error(VerboseError::from_error_kind(
            input,
            ErrorKind::HexDigit,
        ))),
    }
}

use nom::{
    branch::alt,
    bytes::complete::{tag, take_till, take_until, take_while1},
    character::complete::{char, multispace0},
    combinator::map,
    sequence::delimited,
    IResult,
};

pub fn ws<'a, F, O>(inner: F) -> impl FnMut(&'a str) -> IResult<&'a str, O>
where
    F: FnMut(&'a str) -> IResult<&'a str, O>,
{
    delimited(multispace0, inner, multispace0)
}

/// Element or attribute name.
pub fn name(input: &str) -> IResult<&str, &str> {
    take_while1(|c: char| c.is_alphanumeric() || matches!(c, '_' | '-' | ':' | '.'))(input)
}

/// Attribute value in single or double quotes, still entity-encoded.
pub fn quoted(input: &str) -> IResult<&str, &str> {
    alt((
        delimited(char('"'), take_till(|c: char| c == '"'), char('"')),
        delimited(char('\''), take_till(|c: char| c == '\''), char('\'')),
    ))(input)
}

pub fn comment(input: &str) -> IResult<&str, ()> {
    map(delimited(tag("<!--"), take_until("-->"), tag("-->")), |_| ())(input)
}

/// `<?xml ... ?>` and other processing instructions.
pub fn processing_instruction(input: &str) -> IResult<&str, ()> {
    map(delimited(tag("<?"), take_until("?>"), tag("?>")), |_| ())(input)
}

pub fn doctype(input: &str) -> IResult<&str, ()> {
    map(delimited(tag("<!DOCTYPE"), take_until(">"), char('>')), |_| ())(input)
}

pub fn cdata(input: &str) -> IResult<&str, &str> {
    delimited(tag("<![CDATA["), take_until("]]>"), tag("]]>"))(input)
}

/// Decode the predefined entities and numeric character references.
pub fn decode_entities(raw: &str) -> Result<String, String> {
    let mut out = String::with_capacity(raw.len());
    let mut rest = raw;

    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        let after = &rest[amp + 1..];
        let semi = after
            .find(';')
            .ok_or_else(|| format!("unterminated entity in '{raw}'"))?;
        let entity = &after[..semi];

        let decoded = match entity {
            "lt" => '<',
            "gt" => '>',
            "amp" => '&',
            "quot" => '"',
            "apos" => '\'',
            _ => numeric_reference(entity).ok_or_else(|| format!("unknown entity '&{entity};'"))?,
        };
        out.push(decoded);
        rest = &after[semi + 1..];
    }

    out.push_str(rest);
    Ok(out)
}

fn numeric_reference(entity: &str) -> Option<char> {
    let digits = entity.strip_prefix('#')?;
    let code = match digits.strip_prefix('x').or_else(|| digits.strip_prefix('X')) {
        Some(hex) => u32::from_str_radix(hex, 16).ok()?,
        None => digits.parse().ok()?,
    };
    char::from_u32(code)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_entities() {
        assert_eq!(decode_entities("a &lt; b &amp;&amp; c").unwrap(), "a < b && c");
        assert_eq!(decode_entities("&#65;&#x42;").unwrap(), "AB");
        assert_eq!(decode_entities("plain").unwrap(), "plain");
        assert!(decode_entities("&bogus;").is_err());
        assert!(decode_entities("a & b").is_err());
    }

    #[test]
    fn test_quoted() {
        assert_eq!(quoted("\"abc\" rest"), Ok((" rest", "abc")));
        assert_eq!(quoted("'x'"), Ok(("", "x")));
        assert!(quoted("abc").is_err());
    }
}

use super::common::{cdata, comment, decode_entities, doctype, name, processing_instruction, quoted, ws};
use crate::core::{MapperError, StatementKind};
use nom::{
    branch::alt,
    bytes::complete::{tag, take_while1},
    character::complete::{char, multispace0, multispace1},
    combinator::{eof, map, map_res, verify},
    error::{Error, ErrorKind},
    multi::many0,
    sequence::{preceded, separated_pair},
    IResult,
};

/// Required name of the document root element.
pub const ROOT_ELEMENT: &str = "sqlmap";

/// Deepest element nesting accepted below the root.
pub const MAX_DEPTH: usize = 64;

/// One statement entry read from a declaration document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    pub id: String,
    pub kind: StatementKind,
    pub text: String,
}

#[derive(Debug)]
struct Element<'a> {
    name: &'a str,
    attrs: Vec<(&'a str, String)>,
    children: Vec<Node<'a>>,
}

#[derive(Debug)]
enum Node<'a> {
    Text(String),
    Element(Element<'a>),
    Skipped,
}

impl Element<'_> {
    fn attr(&self, key: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Character data directly inside this element; nested elements do not count.
    fn text(&self) -> String {
        self.children
            .iter()
            .filter_map(|node| match node {
                Node::Text(t) => Some(t.as_str()),
                _ => None,
            })
            .collect()
    }
}

fn misc(input: &str) -> IResult<&str, ()> {
    alt((map(multispace1, |_| ()), comment, processing_instruction, doctype))(input)
}

fn attribute(input: &str) -> IResult<&str, (&str, String)> {
    separated_pair(name, ws(char('=')), map_res(quoted, decode_entities))(input)
}

fn text(input: &str) -> IResult<&str, String> {
    map_res(take_while1(|c: char| c != '<'), decode_entities)(input)
}

fn node(input: &str, depth: usize) -> IResult<&str, Node<'_>> {
    alt((
        map(comment, |()| Node::Skipped),
        map(processing_instruction, |()| Node::Skipped),
        map(cdata, |raw| Node::Text(raw.to_string())),
        map(|i| element(i, depth), Node::Element),
        map(text, Node::Text),
    ))(input)
}

fn element(input: &str, depth: usize) -> IResult<&str, Element<'_>> {
    let (input, _) = char('<')(input)?;
    let (input, tag_name) = name(input)?;
    if depth > MAX_DEPTH {
        return Err(nom::Err::Failure(Error::new(input, ErrorKind::TooLarge)));
    }
    let (input, attrs) = many0(preceded(multispace1, attribute))(input)?;
    let (input, _) = multispace0(input)?;

    if let Ok((input, _)) = tag::<_, _, nom::error::Error<&str>>("/>")(input) {
        return Ok((
            input,
            Element {
                name: tag_name,
                attrs,
                children: Vec::new(),
            },
        ));
    }

    let (input, _) = char('>')(input)?;
    let (input, children) = many0(|i| node(i, depth + 1))(input)?;
    let (input, _) = tag("</")(input)?;
    let (input, _) = verify(name, |closing: &str| closing == tag_name)(input)?;
    let (input, _) = multispace0(input)?;
    let (input, _) = char('>')(input)?;

    Ok((
        input,
        Element {
            name: tag_name,
            attrs,
            children,
        },
    ))
}

fn document(input: &str) -> IResult<&str, Element<'_>> {
    let input = input.trim_start_matches('\u{feff}');
    let (input, _) = many0(misc)(input)?;
    let (input, root) = element(input, 0)?;
    let (input, _) = many0(misc)(input)?;
    let (input, _) = eof(input)?;
    Ok((input, root))
}

fn syntax_error(input: &str, e: &Error<&str>) -> MapperError {
    let offset = input.len() - e.input.len();
    let line = input[..offset].matches('\n').count() + 1;
    let reason = match e.code {
        ErrorKind::TooLarge => format!("elements nested deeper than {MAX_DEPTH}"),
        code => code.description().to_string(),
    };
    MapperError::Document(format!("syntax error at byte {offset} (line {line}): {reason}"))
}

/// Read every statement entry of a declaration document.
///
/// Entries are returned grouped by kind (selects, inserts, updates, deletes),
/// each group in document order. Elements of any other name are ignored.
pub fn parse_document(input: &str) -> Result<Vec<Declaration>, MapperError> {
    let root = match document(input) {
        Ok((_, root)) => root,
        Err(nom::Err::Error(e) | nom::Err::Failure(e)) => return Err(syntax_error(input, &e)),
        Err(nom::Err::Incomplete(_)) => {
            return Err(MapperError::Document("unexpected end of document".to_string()));
        }
    };

    if root.name != ROOT_ELEMENT {
        return Err(MapperError::Document(format!(
            "expected root element <{ROOT_ELEMENT}> but found <{}>",
            root.name
        )));
    }

    let mut grouped: [Vec<Declaration>; 4] = Default::default();
    for child in &root.children {
        let Node::Element(entry) = child else {
            continue;
        };
        let Some(kind) = StatementKind::from_element(entry.name) else {
            continue;
        };
        let id = entry.attr("id").ok_or_else(|| {
            MapperError::Document(format!("<{}> entry without an id attribute", entry.name))
        })?;

        grouped[kind as usize - 1].push(Declaration {
            id: id.trim().to_string(),
            kind,
            text: entry.text(),
        });
    }

    Ok(grouped.into_iter().flatten().collect())
}

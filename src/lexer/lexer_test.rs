use std::io::Cursor;

use super::*;

#[test]
fn test_read_type() -> Result<()> {
    let tests = [
        ("t=0 0\r\n", Some(Tag::from("t="))),
        ("\r\n\r\nr=604800 0\r\n", Some(Tag::from("r="))),
        ("\na=foo\n", Some(Tag::from("a="))),
        ("", None),
        ("\r\n\r\n", None),
        ("   \r\n", Some(Tag::default())),
    ];

    for (i, (input, expected)) in tests.iter().enumerate() {
        let mut reader = Cursor::new(input.as_bytes());
        let tag = read_type(&mut reader)?;
        assert_eq!(&tag, expected, "{i}: {input:?}");
    }

    Ok(())
}

#[test]
fn test_read_type_invalid() {
    let tests = [("tt=0 0\r\n", "tt="), ("=0 0\r\n", "="), ("junk\r\n", "junk")];

    for (input, segment) in tests {
        let mut reader = Cursor::new(input.as_bytes());
        assert_eq!(
            read_type(&mut reader),
            Err(Error::SdpInvalidSyntax(segment.to_owned())),
            "{input:?}"
        );
    }
}

#[test]
fn test_read_value() -> Result<()> {
    let tests = [
        ("0 0\r\nr=1 2\r\n", "0 0", 5),
        ("0 0\n", "0 0", 4),
        ("  padded  \r\n", "  padded  ", 12),
        ("no terminator", "no terminator", 13),
        ("\r\n", "", 2),
        ("", "", 0),
    ];

    for (input, expected, expected_bytes) in tests {
        let mut reader = Cursor::new(input.as_bytes());
        let (value, num_bytes) = read_value(&mut reader)?;
        assert_eq!(value, expected, "{input:?}");
        assert_eq!(num_bytes, expected_bytes, "{input:?}");
    }

    Ok(())
}

#[test]
fn test_lexer_peek_push_back_peek() -> Result<()> {
    let mut reader = Cursor::new(b"a=foo\r\nm=audio 0 RTP/AVP 0\r\n".as_slice());
    let mut lexer = Lexer::new(&mut reader);

    let tag = lexer.peek_tag()?.expect("tag");
    assert_eq!(tag, Tag::from("a="));
    assert!(!lexer.has_pending());

    lexer.push_back(tag.clone())?;
    assert!(lexer.has_pending());
    assert_eq!(lexer.peek_tag()?, Some(tag));
    assert!(!lexer.has_pending());

    assert_eq!(lexer.read_line()?, "foo");
    assert_eq!(lexer.peek_tag()?, Some(Tag::from("m=")));
    assert_eq!(lexer.read_line()?, "audio 0 RTP/AVP 0");
    assert_eq!(lexer.peek_tag()?, None);

    Ok(())
}

#[test]
fn test_lexer_push_back_depth_is_one() -> Result<()> {
    let mut reader = Cursor::new(b"a=foo\r\n".as_slice());
    let mut lexer = Lexer::new(&mut reader);

    let tag = lexer.peek_tag()?.expect("tag");
    lexer.push_back(tag)?;

    assert_eq!(
        lexer.push_back(Tag::from("b=")),
        Err(Error::PushbackOccupied("a=".to_owned()))
    );
    assert_eq!(lexer.peek_tag()?, Some(Tag::from("a=")));

    Ok(())
}

#[test]
fn test_lexer_read_line_consumes_pending_tag() -> Result<()> {
    let mut reader = Cursor::new(b"r=604800 0\r\nt=0 0\r\n".as_slice());
    let mut lexer = Lexer::new(&mut reader);

    let tag = lexer.peek_tag()?.expect("tag");
    lexer.push_back(tag)?;

    assert_eq!(lexer.read_line()?, "604800 0");
    assert!(!lexer.has_pending());
    assert_eq!(lexer.peek_tag()?, Some(Tag::from("t=")));

    Ok(())
}

#[test]
fn test_lexer_skips_unread_line_body() -> Result<()> {
    let mut reader = Cursor::new(b"a=dropped\r\na=kept\r\n".as_slice());
    let mut lexer = Lexer::new(&mut reader);

    assert_eq!(lexer.peek_tag()?, Some(Tag::from("a=")));
    assert_eq!(lexer.peek_tag()?, Some(Tag::from("a=")));
    assert_eq!(lexer.read_line()?, "kept");

    Ok(())
}

#[test]
fn test_lexer_stream_exhausted() -> Result<()> {
    let mut reader = Cursor::new(b"".as_slice());
    let mut lexer = Lexer::new(&mut reader);
    assert_eq!(lexer.read_line(), Err(Error::StreamExhausted));

    let mut reader = Cursor::new(b"t=0 0\r\n".as_slice());
    let mut lexer = Lexer::new(&mut reader);
    lexer.peek_tag()?;
    assert_eq!(lexer.read_line()?, "0 0");
    assert_eq!(lexer.read_line(), Err(Error::StreamExhausted));

    Ok(())
}

#[test]
fn test_lexer_bare_tag_at_end_of_input() -> Result<()> {
    let mut reader = Cursor::new(b"t=".as_slice());
    let mut lexer = Lexer::new(&mut reader);

    assert_eq!(lexer.peek_tag()?, Some(Tag::from("t=")));
    assert_eq!(lexer.read_line()?, "");
    assert_eq!(lexer.peek_tag()?, None);

    Ok(())
}

#[test]
fn test_lexer_invalid_utf8_line() -> Result<()> {
    let mut reader = Cursor::new(b"t=\xff\xfe\r\n".as_slice());
    let mut lexer = Lexer::new(&mut reader);

    lexer.peek_tag()?;
    assert!(matches!(lexer.read_line(), Err(Error::Utf8(_))));

    Ok(())
}

#[test]
fn test_write_key_value() {
    let mut out = String::new();
    write_key_value(&mut out, TIME_KEY, Some("0 0")).unwrap();
    write_key_value::<_, &str>(&mut out, REPEAT_TIME_KEY, None).unwrap();
    assert_eq!(out, "t=0 0\r\n");
}

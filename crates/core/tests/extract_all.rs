use pixlink_core::{
    Alignment, Caption, Dialect, ImageLinkParser, ImageSize, ParseOptions, extract_all, parse,
};

#[test]
fn mixed_paragraph_snapshot() {
    let doc = "Intro ![A cat|center](cat.png) then ![[dog.png|A dog|300]] end.";
    let found = extract_all(doc);

    insta::assert_debug_snapshot!(found, @r#"
    [
        LinkMatch {
            matched: "![A cat|center](cat.png)",
            offset: 6,
            link: ImageLink {
                path: "cat.png",
                caption: Text(
                    "A cat",
                ),
                alignment: Some(
                    Center,
                ),
                size: None,
                dialect: Markdown,
            },
        },
        LinkMatch {
            matched: "![[dog.png|A dog|300]]",
            offset: 36,
            link: ImageLink {
                path: "dog.png",
                caption: Text(
                    "A dog",
                ),
                alignment: None,
                size: Some(
                    ImageSize {
                        width: Some(
                            300,
                        ),
                        height: None,
                        format: Width,
                    },
                ),
                dialect: Wiki,
            },
        },
    ]
    "#);
}

#[test]
fn every_match_reparses_to_its_link() {
    let doc = "\
# Gallery

![[sunset.png|Sunset over | the bay|center|800x]]
Some prose with an inline ![thumb|left|x120](thumbs/sunset(1).png) image.

- ![[a.png]]
- ![[b.png|right-wrap]] and ![|300x200](c.png)
";
    let found = extract_all(doc);
    assert_eq!(found.len(), 5);

    let mut previous_end = 0;
    for link_match in &found {
        assert!(link_match.offset >= previous_end, "matches are ordered and disjoint");
        previous_end = link_match.end();
        assert_eq!(&doc[link_match.range()], link_match.matched);
        assert_eq!(parse(link_match.matched).as_ref(), Some(&link_match.link));
    }

    let sunset = &found[0].link;
    assert_eq!(
        sunset.caption(),
        &Caption::Text("Sunset over | the bay".into())
    );
    assert_eq!(sunset.alignment(), Some(Alignment::Center));
    assert_eq!(sunset.size(), Some(ImageSize::width_trailing_x(800).unwrap()));

    let thumb = &found[1].link;
    assert_eq!(thumb.path(), "thumbs/sunset(1).png");
    assert_eq!(thumb.dialect(), Dialect::Markdown);
    assert_eq!(thumb.size(), Some(ImageSize::height_only(120).unwrap()));

    let last = &found[4].link;
    assert!(last.caption().is_blank());
    assert_eq!(last.size(), Some(ImageSize::new(300, 200).unwrap()));
}

#[test]
fn resize_event_rewrites_every_reference() {
    let doc = "\
![[diagram.png|Architecture|center|400]]

```markdown
![[diagram.png|400]]
```

See again: ![Arch|400](diagram.png)
";
    let parser = ImageLinkParser::new(ParseOptions::editor());
    let resized = ImageSize::new(640, 360).unwrap();
    let (rewritten, count) =
        parser.rewrite_links(doc, "diagram.png", |link| link.with_size(Some(resized)));

    assert_eq!(count, 2);
    assert_eq!(
        rewritten,
        "\
![[diagram.png|Architecture|center|640x360]]

```markdown
![[diagram.png|400]]
```

See again: ![Arch|640x360](diagram.png)
"
    );
}

#[test]
fn rehosted_image_carries_attributes() {
    let local = parse("![[paste-1.png|Screenshot|left|500]]").unwrap();
    let remote = local
        .clone()
        .with_path("https://img.example.com/abc.png")
        .unwrap();

    assert_eq!(
        remote.to_string(),
        "![[https://img.example.com/abc.png|Screenshot|left|500]]"
    );
    assert_eq!(parse(&remote.to_string()), Some(remote));
}

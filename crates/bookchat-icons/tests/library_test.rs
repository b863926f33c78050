//! Integration tests for the icon library.

use bookchat_icons::{IconDefinition, IconLibrary, IconPack, IconPrefix};

#[test]
fn test_render_from_class_string() {
    let library = IconLibrary::with_builtin(&IconPrefix::ALL);
    assert_eq!(
        library.render("fa-regular fa-heart").expect("render"),
        r#"<i class="fa-regular fa-heart" aria-hidden="true"></i>"#
    );
    // Aliases render under the canonical name
    assert_eq!(
        library.render("fas home").expect("render"),
        r#"<i class="fa-solid fa-house" aria-hidden="true"></i>"#
    );
}

#[test]
fn test_custom_pack_extends_builtin() {
    let mut library = IconLibrary::with_builtin(&[IconPrefix::Fas]);
    library.add(
        IconPack::new(IconPrefix::Fas)
            .with(IconDefinition::new(IconPrefix::Far, "quote-left", 0xf10d).alias("quote")),
    );

    let quote = library.parse("fas quote").expect("custom alias");
    assert_eq!(quote.prefix, IconPrefix::Fas);
    assert!(library.parse("fas book").is_ok());
    assert_eq!(library.prefixes(), vec![IconPrefix::Fas]);
}

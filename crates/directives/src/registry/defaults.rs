//! Built-in directive catalog.
//!
//! Covers the directives understood by the Marp ecosystem: Marpit's global
//! and local directives, Marp Core extensions, Marp CLI metadata and the
//! VS Code enablement switch.

use super::types::{DirectiveDefinition, Provider};

/// Build the built-in directive definitions in catalog order.
pub fn builtin_definitions() -> Vec<DirectiveDefinition> {
    let mut definitions = global_definitions();
    definitions.extend(local_definitions());
    definitions
}

fn global_definitions() -> Vec<DirectiveDefinition> {
    vec![
        DirectiveDefinition::global(
            "marp",
            Provider::MarpVscode,
            "Set whether or not enable Marp feature in VS Code.",
        )
        .with_details(
            "Only `true` enables the Marp preview; the directive is ignored by the Marp toolchain \
             itself.",
        ),
        DirectiveDefinition::global(
            "theme",
            Provider::Marpit,
            "Set a theme name of the slide deck.",
        )
        .with_details(
            "Marp Core provides `default`, `gaia` and `uncover` built-in themes. Custom themes \
             can be registered through the theme set.",
        ),
        DirectiveDefinition::global(
            "style",
            Provider::Marpit,
            "Specify CSS for tweaking theme.",
        )
        .with_details(
            "The CSS is appended to the theme. A block scalar (`style: |`) keeps multi-line rules \
             readable.",
        ),
        DirectiveDefinition::global(
            "headingDivider",
            Provider::Marpit,
            "Specify heading divider option.",
        )
        .with_details(
            "Splits a slide before every heading at or above the given level. Accepts a level \
             from 1 to 6, or an array of levels.",
        ),
        DirectiveDefinition::global(
            "size",
            Provider::MarpCore,
            "Choose the slide size preset provided by theme.",
        )
        .with_details("Built-in themes accept `16:9` (1280x720) and `4:3` (960x720)."),
        DirectiveDefinition::global(
            "math",
            Provider::MarpCore,
            "Choose a library to render math typesetting.",
        )
        .with_details("Accepts `mathjax` or `katex`."),
        DirectiveDefinition::global(
            "title",
            Provider::MarpCli,
            "Set a title of the slide deck.",
        ),
        DirectiveDefinition::global(
            "description",
            Provider::MarpCli,
            "Set a description of the slide deck.",
        ),
        DirectiveDefinition::global(
            "author",
            Provider::MarpCli,
            "Set an author of the slide deck.",
        ),
        DirectiveDefinition::global(
            "keywords",
            Provider::MarpCli,
            "Set comma-separated keywords for the slide deck.",
        ),
        DirectiveDefinition::global(
            "url",
            Provider::MarpCli,
            "Set canonical URL for the slide deck.",
        ),
        DirectiveDefinition::global(
            "image",
            Provider::MarpCli,
            "Set Open Graph image URL.",
        ),
    ]
}

fn local_definitions() -> Vec<DirectiveDefinition> {
    vec![
        DirectiveDefinition::local(
            "paginate",
            Provider::Marpit,
            "Show page number on the slide if set to `true`.",
        ),
        DirectiveDefinition::local(
            "header",
            Provider::Marpit,
            "Specify the content of slide header.",
        )
        .with_details("The value is rendered as inline Markdown in a `<header>` element."),
        DirectiveDefinition::local(
            "footer",
            Provider::Marpit,
            "Specify the content of slide footer.",
        )
        .with_details("The value is rendered as inline Markdown in a `<footer>` element."),
        DirectiveDefinition::local(
            "class",
            Provider::Marpit,
            "Specify HTML class of the slide element.",
        )
        .with_details("Space-separated class names, for example `lead` or `invert`."),
        DirectiveDefinition::local(
            "backgroundColor",
            Provider::Marpit,
            "Specify background-color style.",
        ),
        DirectiveDefinition::local(
            "backgroundImage",
            Provider::Marpit,
            "Specify background-image style.",
        )
        .with_details("Prefer the `![bg](image.jpg)` image syntax for full-featured backgrounds."),
        DirectiveDefinition::local(
            "backgroundPosition",
            Provider::Marpit,
            "Specify background-position style.",
        ),
        DirectiveDefinition::local(
            "backgroundRepeat",
            Provider::Marpit,
            "Specify background-repeat style.",
        ),
        DirectiveDefinition::local(
            "backgroundSize",
            Provider::Marpit,
            "Specify background-size style.",
        ),
        DirectiveDefinition::local(
            "color",
            Provider::Marpit,
            "Specify color style (base text color).",
        ),
    ]
}

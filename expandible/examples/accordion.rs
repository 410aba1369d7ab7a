use std::fs::File;

use expandible::{Options, Registry};
use simplelog::{Config, LevelFilter, WriteLogger};
use tuidom::{Document, Element, Event, Key};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Set up file logging
    let log_file = File::create("accordion.log")?;
    WriteLogger::init(LevelFilter::Debug, Config::default(), log_file)?;

    let mut doc = Document::new(ui());
    let mut registry = Registry::new();

    let page = doc.root_key().to_string();
    let report = registry.init_all(&mut doc, &page, None, &Options::new())?;
    for (root, err) in &report.failed {
        eprintln!("{root}: {err}");
    }

    let script = vec![
        Event::click("shipping-q"),
        Event::key("returns-q", Key::Enter),
        Event::click("footer"),
        Event::key("shipping-q", Key::Char(' ')),
    ];

    for event in script {
        let outcome = registry.handle_event(&mut doc, &event);
        println!("{event:?}");
        for transition in &outcome.transitions {
            if let Some(controller) = registry.get(transition.instance) {
                println!("  {} -> expanded={}", controller.id(), transition.expanded);
            }
        }
        if outcome.default_prevented {
            println!("  default prevented");
        }
    }

    Ok(())
}

fn ui() -> Element {
    Element::col()
        .key("page")
        .child(section("shipping", "How long does shipping take?", false))
        // Closes when anything else is pressed or focused
        .child(section("returns", "Can I return an item?", true))
        .child(Element::text("Contact us").key("footer"))
}

fn section(name: &str, question: &str, close_on_blur: bool) -> Element {
    let root = Element::box_()
        .key(name)
        .id(format!("faq-{name}"))
        .attr("data-expandible", "")
        .child(
            Element::text(question)
                .key(format!("{name}-q"))
                .attr("data-expandible-toggle", ""),
        )
        .child(Element::text("...").key(format!("{name}-a")));

    if close_on_blur {
        root.attr("data-expandible-close-on-blur", "true")
    } else {
        root
    }
}

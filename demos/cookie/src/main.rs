//! The cookie sentence, wired end to end: drag the cookie count and watch
//! calories and the daily percentage recompute.
//!
//! Run with `RUST_LOG=debug` to see the engine's diagnostics and the
//! adjustable number's drag writes.

use tangle_core::{Document, Element, Event, FnModel, Registry, Tangle};

fn build_document() -> (Document, tangle_core::NodeId) {
    let mut doc = Document::new();
    let root = doc.root();

    doc.append_text(root, "When you eat ");
    let cookies = doc.insert(
        root,
        Element::new("span")
            .class("TKAdjustableNumber")
            .var("cookies")
            .attr("data-min", "1")
            .attr("data-max", "20")
            .text(" cookies"),
    );
    doc.append_text(root, ", you'll consume ");
    doc.insert(root, Element::new("span").var("calories"));
    doc.append_text(root, " calories; that's ");
    doc.insert(root, Element::new("span").var("dailyPercent"));
    doc.append_text(root, "% of your recommended daily calories.");

    (doc, cookies)
}

fn main() {
    env_logger::init();

    let (doc, cookies) = build_document();

    let mut registry = Registry::default();
    tangle_kit::install(&mut registry);

    let model = FnModel::new(
        |vars| {
            vars.set("cookies", 3);
            vars.set("caloriesPerCookie", 50);
            vars.set("caloriesPerDay", 2100);
        },
        |vars| {
            let calories = vars.number("cookies") * vars.number("caloriesPerCookie");
            vars.set("calories", calories);
            vars.set(
                "dailyPercent",
                (100.0 * calories / vars.number("caloriesPerDay")).round(),
            );
        },
    );

    let mut tangle = Tangle::with_registry(doc, model, registry);
    let root = tangle.document().root();
    println!("{}", tangle.document().rendered_text(root));

    // Drag the cookie count 10px to the right.
    tangle.dispatch(cookies, Event::PointerDown);
    tangle.dispatch(cookies, Event::PointerMove { dx: 10.0, dy: 0.0 });
    tangle.dispatch(cookies, Event::PointerUp);

    log::info!("cookies is now {}", tangle.get_value("cookies"));
    println!("{}", tangle.document().rendered_text(root));
}

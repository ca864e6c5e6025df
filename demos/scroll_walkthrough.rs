use scrollkit::{RegionMode, ScrollEngine, TimeMs, TriggerConfig, load_decls};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let decls = load_decls(include_str!("../tests/data/page_decls.json"))?;

    let mut engine = ScrollEngine::new();
    engine.publish_resize(720.0, TimeMs(0.0));

    for decl in decls {
        let id = decl.id.clone();
        let config = match decl.mode {
            RegionMode::Counter => TriggerConfig::new(decl, |_, _| {})
                .with_counter_value(move |n| println!("{id}: count {n}")),
            RegionMode::Pin => TriggerConfig::new(decl, |_, _| {})
                .with_pin_offset(move |o| println!("{id}: content offset {o:.0}")),
            RegionMode::Reveal => {
                TriggerConfig::new(decl, move |p, s| println!("{id}: progress {p:.2} ({s:?})"))
            }
        };
        engine.register(config)?;
    }

    // Walk down the page the way a frame loop would.
    let mut now = 0.0;
    let mut offset = 0.0;
    while offset <= 4500.0 {
        engine.publish_scroll(offset, TimeMs(now));
        engine.frame(TimeMs(now));
        offset += 240.0;
        now += 16.0;
    }
    // Drain whatever the counter still has queued.
    for _ in 0..120 {
        now += 16.0;
        engine.frame(TimeMs(now));
    }

    Ok(())
}

//! Flow Demo: Lays out an article across three terminal columns.
//!
//! Run with `RUST_LOG=flywheel_regions=debug` to watch the passes.
//!
//! The first layout runs directly on the registry. The registry then moves
//! onto the layout actor, which re-flows it after the columns shrink.

use flywheel_regions::{
    ActorConfig, ContentNode, FlowRegistry, FlowTrigger, LayoutActor, LayoutEvent, Rect, Region,
    RegionId, TextRegion,
};
use std::time::Duration;
use tracing_subscriber::EnvFilter;

const ARTICLE: &[&str] = &[
    "Regions are fixed-size boxes on the screen. Content poured into the first one continues in \
     the next when it runs out of room, the way a newspaper story jumps between columns.",
    "A paragraph that does not fit is split at the last word that still fits. Everything after \
     that point moves on, keeping the paragraph's structure.",
    "Pictures and other atomic items are never cut in half. They move to the next region whole.",
    "Whatever the last region cannot show is overset, and the layout says so.",
];

fn article() -> Vec<ContentNode> {
    let mut nodes: Vec<ContentNode> = ARTICLE
        .iter()
        .map(|text| ContentNode::block("p", vec![ContentNode::text(*text)]))
        .collect();
    nodes.insert(
        2,
        ContentNode::block("figure", vec![ContentNode::atomic("img", "diagram", 3)]),
    );
    nodes
}

fn columns(width: u16, height: u16) -> Vec<TextRegion> {
    Rect::from_size(width, height)
        .columns(3, 3)
        .into_iter()
        .enumerate()
        .map(|(i, rect)| TextRegion::new(RegionId::new(u16::try_from(i).unwrap_or(u16::MAX)), rect))
        .collect()
}

fn print_flow(registry: &FlowRegistry<TextRegion>) {
    for flow in registry.flows() {
        println!("flow `{}` overset={}", flow.name(), flow.overset());
        for region in flow.regions() {
            let status = flow
                .region_status(region.id())
                .map_or("hidden", |status| status.as_str());
            println!("  {:?} [{status}] {:?}", region.id(), region.rect());
            for line in region.lines() {
                println!("  | {line}");
            }
        }
    }
    println!();
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("Flywheel Regions Demo");
    println!("=====================");
    println!();

    let mut registry = FlowRegistry::new();
    for node in article() {
        registry.add_content("article", node);
    }
    for region in columns(90, 8) {
        registry.add_region("article", region);
    }

    let outcome = registry.do_layout();
    println!("updates: {:?}", outcome.updates);
    for failure in &outcome.failures {
        eprintln!("layout of `{}` failed: {}", failure.flow, failure.error);
    }
    if !outcome.is_complete() {
        return;
    }
    print_flow(&registry);

    let actor = LayoutActor::spawn(registry, ActorConfig::default());
    let resized = actor.edit(|registry| {
        if let Some(flow) = registry.named_flow_mut("article") {
            for (region, rect) in flow
                .regions_mut()
                .iter_mut()
                .zip(Rect::from_size(72, 6).columns(3, 3))
            {
                region.set_rect(rect);
            }
        }
        FlowTrigger::RESIZE
    });
    if let Err(error) = resized {
        eprintln!("resize failed: {error}");
        return;
    }

    while let Ok(event) = actor.events().recv_timeout(Duration::from_secs(1)) {
        println!("event: {event:?}");
        if matches!(event, LayoutEvent::Completed { .. }) {
            break;
        }
    }

    if let Some(registry) = actor.join() {
        print_flow(&registry);
        println!("stats: {:?}", registry.stats());
    }
}

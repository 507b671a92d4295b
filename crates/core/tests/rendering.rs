//! Mosaic rendering of finished grids

use toothpick_core::{grow, render, write_mosaic, RenderOptions, RunConfig};

#[test]
fn test_plain_mosaic_three_generations() {
    let engine = grow(3).unwrap();
    let text = render(engine.grid(), RenderOptions::plain());
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(
        lines,
        vec!["╞╦═╦╡", " ╠╦╣ ", " ║║║ ", " ╠╩╣ ", "╞╩═╩╡"]
    );
}

#[test]
fn test_scaled_mosaic_stretches_segments() {
    let engine = grow(1).unwrap();
    let text = render(engine.grid(), RenderOptions::default());
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(
        lines,
        vec![
            "╞═══╦═══╡",
            "    ║    ",
            "    ║    ",
            "    ║    ",
            "╞═══╩═══╡",
        ]
    );
}

#[test]
fn test_line_count_follows_vertical_scale() {
    let engine = grow(6).unwrap();
    let height = engine.grid().height() as usize;
    for v_scale in 0..4 {
        let opts = RenderOptions { h_scale: 2, v_scale };
        let text = render(engine.grid(), opts);
        assert_eq!(text.lines().count(), height + (height - 1) * v_scale as usize);
    }
}

#[test]
fn test_line_width_follows_horizontal_scale() {
    let engine = grow(6).unwrap();
    let width = engine.grid().width() as usize;
    for h_scale in 0..4 {
        let opts = RenderOptions { h_scale, v_scale: 1 };
        let text = render(engine.grid(), opts);
        for line in text.lines() {
            assert_eq!(line.chars().count(), width + (width - 1) * h_scale as usize);
        }
    }
}

#[test]
fn test_writer_output_is_utf8_mosaic() {
    let engine = grow(4).unwrap();
    let config = RunConfig::default();
    let mut out = Vec::new();
    write_mosaic(engine.grid(), config.render, &mut out).unwrap();
    let text = String::from_utf8(out).unwrap();
    assert!(text.ends_with('\n'));
    assert_eq!(text, render(engine.grid(), config.render));
}

#[test]
fn test_stats_serialize_to_json() {
    let engine = grow(5).unwrap();
    let json = serde_json::to_value(engine.stats()).unwrap();
    assert_eq!(json["toothpicks"], 23);
    assert_eq!(json["history"].as_array().unwrap().len(), 5);
    assert_eq!(json["history"][0]["axis"], "Horizontal");

    let sizing = serde_json::to_value(engine.sizing()).unwrap();
    assert_eq!(sizing["granted"], 5);
    assert_eq!(sizing["dims"]["width"], 7);
}

//! # Decoder Tests
//!
//! Every decoder against a recording surface: skip rules, pass order,
//! sub-kind bands and blend restoration.
//!
//! Run with: cargo test --package ember_rendering --test decoder_test

use ember_core::{Effect, ParticleRecord};
use ember_rendering::{
    decoder_for, render_effect, render_fire, render_firework, render_rain, render_sparks,
    render_text, BlendMode, Canvas2d, DecodeFn, DrawOp, DrawRecorder, Paint, Rgba, SceneExtras,
    TextBox, FIREWORK_PALETTE,
};

const W: f32 = 200.0;
const H: f32 = 100.0;

fn particle(x: f32, y: f32, life: f32, kind: f32, aux: f32) -> ParticleRecord {
    ParticleRecord { x, y, life, seed: 0.0, vx: 0.0, vy: 0.0, kind, aux }
}

fn circles(canvas: &DrawRecorder) -> Vec<(f32, f32, BlendMode, Paint)> {
    canvas
        .commands()
        .iter()
        .filter_map(|c| match c.op {
            DrawOp::Circle { cx, cy, .. } => Some((cx, cy, c.blend, c.fill)),
            _ => None,
        })
        .collect()
}

#[test]
fn inactive_records_are_skipped_by_every_decoder() {
    let records = [
        particle(0.5, 0.5, 0.0, 0.0, 1.0),
        particle(0.5, 0.5, -1.0, 1.0, 1.0),
        particle(0.5, 0.5, f32::NAN, 2.0, 1.0),
    ];
    let extras = SceneExtras::default();

    for effect in Effect::ALL {
        let mut canvas = DrawRecorder::new(W, H);
        let stats = decoder_for(effect)(&mut canvas, &records, records.len(), &extras, 0.0);

        assert_eq!(stats.drawn, 0, "{effect}");
        assert_eq!(stats.skipped, 3, "{effect}");
        assert_eq!(canvas.circle_count(), 0, "{effect}");
        assert_eq!(canvas.line_count(), 0, "{effect}");
        assert!(
            canvas.commands().iter().all(|c| !matches!(c.op, DrawOp::Text { .. })),
            "{effect}"
        );
    }
}

#[test]
fn count_limits_the_records_inspected() {
    let records = vec![particle(0.5, 0.5, 1.0, 0.0, 1.0); 10];
    let mut canvas = DrawRecorder::new(W, H);

    let stats = render_effect(Effect::Snow, &mut canvas, &records, 4, &SceneExtras::default(), 0.0);
    assert_eq!(stats.drawn, 4);
    assert_eq!(canvas.circle_count(), 4);

    let stats = render_effect(Effect::Snow, &mut canvas, &records, 99, &SceneExtras::default(), 0.0);
    assert_eq!(stats.drawn, 10);
}

#[test]
fn positions_map_to_top_down_canvas() {
    let records = [particle(0.25, 0.75, 1.0, 0.0, 0.0)];
    let mut canvas = DrawRecorder::new(W, H);
    render_effect(Effect::Snow, &mut canvas, &records, 1, &SceneExtras::default(), 0.0);

    let drawn = circles(&canvas);
    assert_eq!(drawn.len(), 1);
    assert!((drawn[0].0 - 50.0).abs() < 1e-4);
    assert!((drawn[0].1 - 25.0).abs() < 1e-4);
}

#[test]
fn fire_draws_smoke_normally_then_flames_additively() {
    let flame = particle(0.2, 0.5, 1.0, 0.0, 1.0);
    let smoke = particle(0.8, 0.5, 1.0, 1.0, 1.0);
    let mut canvas = DrawRecorder::new(W, H);

    let stats = render_fire(&mut canvas, &[flame, smoke], 2, &SceneExtras::default(), 0.0);
    assert_eq!(stats.drawn, 2);

    let drawn = circles(&canvas);
    assert_eq!(drawn.len(), 2);
    // Smoke first, at x = 0.8 * W, normal blend.
    assert!((drawn[0].0 - 160.0).abs() < 1e-4);
    assert_eq!(drawn[0].2, BlendMode::Normal);
    // Flame second, at x = 0.2 * W, additive.
    assert!((drawn[1].0 - 40.0).abs() < 1e-4);
    assert_eq!(drawn[1].2, BlendMode::Additive);
    assert_eq!(canvas.blend_mode(), BlendMode::Normal);
}

#[test]
fn fire_kind_at_band_edge_is_drawn_once() {
    let edge = particle(0.5, 0.5, 1.0, 0.5, 1.0);
    let mut canvas = DrawRecorder::new(W, H);
    render_fire(&mut canvas, &[edge], 1, &SceneExtras::default(), 0.0);

    let drawn = circles(&canvas);
    assert_eq!(drawn.len(), 1);
    assert_eq!(drawn[0].2, BlendMode::Normal);
}

#[test]
fn fire_smoke_color_and_radius() {
    let smoke = particle(0.5, 0.5, 2.5, 1.0, 0.0);
    let mut canvas = DrawRecorder::new(W, H);
    render_fire(&mut canvas, &[smoke], 1, &SceneExtras::default(), 0.0);

    let cmd = canvas
        .commands()
        .iter()
        .find(|c| matches!(c.op, DrawOp::Circle { .. }))
        .unwrap();
    // aux of zero means size 1: radius 6 + 4.
    assert_eq!(cmd.op, DrawOp::Circle { cx: 100.0, cy: 50.0, radius: 10.0 });
    assert_eq!(cmd.fill, Paint::Solid(Rgba::new(120, 120, 120, 0.45)));
}

#[test]
fn fire_background_and_torch() {
    let extras = SceneExtras { torch: Some([0.5, 0.2]), text_box: None };
    let mut canvas = DrawRecorder::new(W, H);
    render_fire(&mut canvas, &[], 0, &extras, 0.0);

    let rects: Vec<_> = canvas
        .commands()
        .iter()
        .filter(|c| matches!(c.op, DrawOp::FillRect { .. }))
        .collect();
    assert_eq!(rects.len(), 3);
    assert_eq!(
        rects[0].fill,
        Paint::VerticalGradient { top: Rgba::hex(0x1a_0c_08), bottom: Rgba::hex(0x05_06_0b) }
    );
    match rects[1].op {
        DrawOp::FillRect { x, y, w, h } => {
            assert!((x - 94.0).abs() < 1e-4);
            assert!((y - 80.0).abs() < 1e-4);
            assert!((w - 12.0).abs() < 1e-4);
            assert!((h - 12.0).abs() < 1e-4);
        }
        ref other => panic!("unexpected op: {other:?}"),
    }
}

#[test]
fn firework_layers_follow_kind_bands() {
    let records = [
        particle(0.1, 0.5, 1.0, 0.0, 1.0), // spark
        particle(0.3, 0.5, 1.0, 1.0, 2.0), // smoke
        particle(0.5, 0.5, 1.0, 2.0, 3.0), // ash
        particle(0.7, 0.5, 1.0, 1.5, 0.0), // between bands
        particle(0.9, 0.5, 1.0, 0.7, 0.0), // between bands
    ];
    let mut canvas = DrawRecorder::new(W, H);
    let stats = render_firework(&mut canvas, &records, records.len(), &SceneExtras::default(), 0.0);

    assert_eq!(stats.drawn, 3);
    assert_eq!(stats.skipped, 0);

    let drawn: Vec<_> = canvas
        .commands()
        .iter()
        .filter_map(|c| match c.op {
            DrawOp::Circle { cx, radius, .. } => Some((cx, radius, c.blend)),
            _ => None,
        })
        .collect();
    assert_eq!(drawn.len(), 3);
    // Smoke, ash, spark.
    assert!((drawn[0].0 - 60.0).abs() < 1e-4);
    assert!((drawn[0].1 - 12.0).abs() < f32::EPSILON);
    assert_eq!(drawn[0].2, BlendMode::Normal);
    assert!((drawn[1].0 - 100.0).abs() < 1e-4);
    assert!((drawn[1].1 - 3.0).abs() < f32::EPSILON);
    assert_eq!(drawn[1].2, BlendMode::Normal);
    assert!((drawn[2].0 - 20.0).abs() < 1e-4);
    assert!((drawn[2].1 - 2.0).abs() < f32::EPSILON);
    assert_eq!(drawn[2].2, BlendMode::Additive);

    assert_eq!(canvas.blend_mode(), BlendMode::Normal);
}

#[test]
fn firework_spark_uses_palette_tint() {
    let spark = particle(0.5, 0.5, 1.4, 0.0, 2.0);
    let mut canvas = DrawRecorder::new(W, H);
    render_firework(&mut canvas, &[spark], 1, &SceneExtras::default(), 0.0);

    let [r, g, b] = FIREWORK_PALETTE[2];
    let (_, _, _, fill) = circles(&canvas)[0];
    match fill {
        Paint::Solid(color) => {
            assert_eq!((color.r, color.g, color.b), (r, g, b));
            assert!((color.a - 1.0).abs() < 1e-6);
        }
        other => panic!("unexpected paint: {other:?}"),
    }
}

#[test]
fn text_labels_are_zero_padded() {
    let records = [particle(0.5, 0.5, 1.0, 0.0, 42.0), particle(0.5, 0.5, 1.0, 0.0, 10_007.0)];
    let extras = SceneExtras {
        torch: None,
        text_box: Some(TextBox { x: 0.35, y: 0.2, w: 0.3, h: 0.25 }),
    };
    let mut canvas = DrawRecorder::new(W, H);
    render_text(&mut canvas, &records, 2, &extras, 0.0);

    let outline = canvas
        .commands()
        .iter()
        .find(|c| matches!(c.op, DrawOp::StrokeRect { .. }))
        .unwrap();
    assert!((outline.line_width - 2.0).abs() < f32::EPSILON);

    let labels: Vec<_> = canvas
        .commands()
        .iter()
        .filter_map(|c| match &c.op {
            DrawOp::Text { text, x, y } => Some((text.clone(), *x, *y)),
            _ => None,
        })
        .collect();
    assert_eq!(labels.len(), 2);
    assert_eq!(labels[0].0, "0042");
    assert_eq!(labels[1].0, "0007");
    assert!((labels[0].1 - 90.0).abs() < 1e-4);
    assert!((labels[0].2 - 50.0).abs() < 1e-4);
}

#[test]
fn rain_drop_hangs_below_particle() {
    let mut drop = particle(0.5, 0.5, 1.0, 0.0, 0.0);
    drop.vy = -0.1;
    let mut canvas = DrawRecorder::new(W, H);
    render_rain(&mut canvas, &[drop], 1, &SceneExtras::default(), 0.0);

    let line = canvas
        .commands()
        .iter()
        .find(|c| matches!(c.op, DrawOp::Line { .. }))
        .unwrap();
    // |vy| * 18 = 1.8, clamped up to 8.
    assert_eq!(line.op, DrawOp::Line { x0: 100.0, y0: 50.0, x1: 100.0, y1: 58.0 });
    assert!((line.line_width - 1.0).abs() < f32::EPSILON);
}

#[test]
fn every_decoder_paints_background_first() {
    for effect in Effect::ALL {
        let mut canvas = DrawRecorder::new(W, H);
        render_effect(effect, &mut canvas, &[], 0, &SceneExtras::default(), 0.0);
        match canvas.commands().first().map(|c| &c.op) {
            Some(DrawOp::FillRect { x, y, w, h }) => {
                assert_eq!((*x, *y, *w, *h), (0.0, 0.0, W, H), "{effect}");
            }
            other => panic!("{effect}: unexpected first op {other:?}"),
        }
    }
}

#[test]
fn spark_streak_trails_against_velocity() {
    let mut spark = particle(0.5, 0.5, 1.0, 0.0, 0.0);
    spark.vx = 1.0;
    spark.vy = 1.0;
    let mut canvas = DrawRecorder::new(W, H);
    let stats = render_sparks(&mut canvas, &[spark], 1, &SceneExtras::default(), 0.0);
    assert_eq!(stats.drawn, 1);

    let lines: Vec<_> = canvas.commands().iter().filter(|c| matches!(c.op, DrawOp::Line { .. })).collect();
    assert_eq!(lines.len(), 1);
    // Tail goes left by vx * 18 and down the canvas by vy * 18.
    assert_eq!(lines[0].op, DrawOp::Line { x0: 100.0, y0: 50.0, x1: 82.0, y1: 68.0 });
    assert_eq!(lines[0].stroke, Rgba::new(255, 200, 140, 0.8));
    assert!((lines[0].line_width - 1.5).abs() < f32::EPSILON);
}

/// Fill alpha of the only circle drawn for a single record at `life`.
fn circle_alpha(decode: DecodeFn, kind: f32, life: f32) -> f32 {
    let record = particle(0.5, 0.5, life, kind, 1.0);
    let mut canvas = DrawRecorder::new(W, H);
    decode(&mut canvas, &[record], 1, &SceneExtras::default(), 0.0);

    let drawn = circles(&canvas);
    assert_eq!(drawn.len(), 1, "kind {kind} life {life}");
    match drawn[0].3 {
        Paint::Solid(color) => color.a,
        other => panic!("unexpected paint: {other:?}"),
    }
}

#[test]
fn alpha_fades_as_life_runs_out() {
    let layers: [(&str, DecodeFn, f32); 5] = [
        ("fire flame", render_fire, 0.0),
        ("fire smoke", render_fire, 1.0),
        ("firework smoke", render_firework, 1.0),
        ("firework ash", render_firework, 2.0),
        ("firework spark", render_firework, 0.0),
    ];

    for (name, decode, kind) in layers {
        let alphas: Vec<_> = [0.2, 0.6, 1.0].iter().map(|&life| circle_alpha(decode, kind, life)).collect();
        assert!(alphas[0] < alphas[1] && alphas[1] < alphas[2], "{name}: {alphas:?}");
    }
}

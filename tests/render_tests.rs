use std::fs::File;
use std::io::BufReader;

use datatest_stable::Utf8Path;
use deparc::layout::{relations, slots};
use deparc::{BlockReader, Diagram, Options, Rasterizer, Sentence, WordId, parse_sentence};

/// Every fixture is drawn with these option sets.
fn option_sets() -> Vec<(&'static str, Options)> {
    let plain = Options::default();
    let rooted = Options {
        draw_root: true,
        ..Options::default()
    };
    vec![
        ("plain", plain.clone()),
        ("tagged", plain.tagged()),
        ("rooted", rooted),
    ]
}

fn load(path: &Utf8Path) -> datatest_stable::Result<Vec<Sentence>> {
    let reader = BlockReader::new(BufReader::new(File::open(path)?));
    let mut sentences = Vec::new();
    for block in reader {
        let block = block?;
        let name = format!("{path}:{}", block.line);
        if let Some(sentence) = parse_sentence(&name, &block.text)? {
            sentences.push(sentence);
        }
    }
    Ok(sentences)
}

/// An arc strictly enclosing another is drawn strictly higher.
fn check_nesting(diagram: &Diagram, context: &str) {
    for outer in &diagram.arcs {
        assert!(outer.height >= 1, "{context}: arc below level 1");
        for inner in &diagram.arcs {
            if outer.relation != inner.relation && outer.relation.contains(&inner.relation) {
                assert!(
                    outer.height > inner.height,
                    "{context}: ({},{}) h={} encloses ({},{}) h={}",
                    outer.relation.word_start,
                    outer.relation.word_end,
                    outer.height,
                    inner.relation.word_start,
                    inner.relation.word_end,
                    inner.height
                );
            }
        }
    }
    let expected_max = diagram.arcs.iter().map(|a| a.height).max().unwrap_or(0);
    assert_eq!(diagram.max_height(), expected_max, "{context}");
}

/// At every word the slots in use are exactly 0..n.
fn check_slots(sentence: &Sentence, context: &str) {
    let relations = relations::extract_relations(sentence).unwrap();
    let assigned = slots::assign_slots(&relations);
    for id in 1..=sentence.len() {
        let mut used = slots::slots_at(&relations, &assigned, WordId(id));
        used.sort();
        let n = used.len();
        assert_eq!(used, (0..n).collect::<Vec<_>>(), "{context}: word {id}");
    }
}

fn count(svg: &str, pattern: &str) -> usize {
    regex_lite::Regex::new(pattern)
        .unwrap()
        .find_iter(svg)
        .count()
}

fn render_fixture(path: &Utf8Path) -> datatest_stable::Result<()> {
    let sentences = load(path)?;
    assert!(!sentences.is_empty(), "{path}: no sentences");
    let rasterizer = Rasterizer::new();

    for sentence in &sentences {
        check_slots(sentence, &format!("{path} {}", sentence.id));

        for (variant, options) in option_sets() {
            let context = format!("{path} {} [{variant}]", sentence.id);

            let diagram = deparc::layout_sentence(sentence, &options)?;
            check_nesting(&diagram, &context);
            let words = sentence.len() + usize::from(options.draw_root);
            let arcs = words - 1;
            assert_eq!(diagram.arcs.len(), arcs, "{context}");

            let svg = deparc::diagram_to_svg(&diagram);
            assert_eq!(
                svg,
                deparc::render_svg(sentence, &options)?,
                "{context}: output differs between runs"
            );

            // background + per arc: left leg, top, right leg, arrowhead
            assert_eq!(count(&svg, r"<path "), 1 + 4 * arcs, "{context}");
            // sentence line + one label per arc + one cell per word and tag row
            assert_eq!(
                count(&svg, r"<text "),
                1 + arcs + words * options.tags.len(),
                "{context}"
            );

            let png = rasterizer.encode_png(&svg)?;
            let image = image::load_from_memory(&png)?;
            assert_eq!(
                (image.width(), image.height()),
                (diagram.canvas.width, diagram.canvas.height),
                "{context}"
            );
        }
    }
    Ok(())
}

datatest_stable::harness! {
    { test = render_fixture, root = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures"), pattern = r"\.conll$" },
}

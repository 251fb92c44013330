use pie_layout::core::{Color, DataValue, base_palette, slice_palette};
use pie_layout::layout::{LayoutContext, reduce_trace};
use pie_layout::trace::{FigureDefaults, PieTraceSpec, TextInfo};

fn resolve(spec: PieTraceSpec) -> pie_layout::trace::PieTrace {
    spec.resolve(&FigureDefaults::default())
}

#[test]
fn duplicate_labels_keep_first_occurrence() {
    let trace = resolve(
        PieTraceSpec::new([1.0, 2.0, 3.0])
            .with_labels(["a", "a", "b"])
            .with_sort(false),
    );
    let reduced = reduce_trace(&trace, &mut LayoutContext::new()).expect("visible trace");

    let kept: Vec<(usize, f64, &str)> = reduced
        .slices
        .iter()
        .map(|slice| (slice.index, slice.value, slice.label.as_str()))
        .collect();
    assert_eq!(kept, vec![(0, 1.0, "a"), (2, 3.0, "b")]);
    assert_eq!(reduced.total, 4.0);
}

#[test]
fn sorting_orders_slices_by_descending_value() {
    let trace = resolve(PieTraceSpec::new([1.0, 5.0, 3.0]));
    let reduced = reduce_trace(&trace, &mut LayoutContext::new()).expect("visible trace");

    let values: Vec<f64> = reduced.slices.iter().map(|slice| slice.value).collect();
    let indices: Vec<usize> = reduced.slices.iter().map(|slice| slice.index).collect();
    assert_eq!(values, vec![5.0, 3.0, 1.0]);
    assert_eq!(indices, vec![1, 2, 0]);
}

#[test]
fn tied_values_still_sort_non_increasing() {
    let trace = resolve(PieTraceSpec::new([2.0, 7.0, 2.0, 4.0, 2.0]));
    let reduced = reduce_trace(&trace, &mut LayoutContext::new()).expect("visible trace");

    let values: Vec<f64> = reduced.slices.iter().map(|slice| slice.value).collect();
    assert_eq!(values.len(), 5);
    assert!(values.windows(2).all(|pair| pair[0] >= pair[1]));
    assert_eq!(reduced.slices[0].index, 1);
}

#[test]
fn missing_labels_fall_back_to_label0_and_dlabel() {
    let mut spec = PieTraceSpec::new([1.0, 1.0, 1.0]).with_sort(false);
    spec.label0 = Some(10.0);
    spec.dlabel = Some(5.0);
    let trace = resolve(spec);
    let reduced = reduce_trace(&trace, &mut LayoutContext::new()).expect("visible trace");

    let labels: Vec<&str> = reduced.slices.iter().map(|s| s.label.as_str()).collect();
    assert_eq!(labels, vec!["10", "15", "20"]);
}

#[test]
fn numeric_labels_and_strings_are_both_accepted() {
    let trace = resolve(
        PieTraceSpec::new(vec![DataValue::from("4"), DataValue::Number(1.0)])
            .with_labels(vec![DataValue::Number(2.5), DataValue::from("x")])
            .with_sort(false),
    );
    let reduced = reduce_trace(&trace, &mut LayoutContext::new()).expect("visible trace");

    assert_eq!(reduced.slices[0].label, "2.5");
    assert_eq!(reduced.slices[0].value, 4.0);
    assert_eq!(reduced.slices[1].label, "x");
}

#[test]
fn trace_without_usable_values_is_invisible() {
    let trace = resolve(PieTraceSpec::new(vec![
        DataValue::Number(-1.0),
        DataValue::from("abc"),
        DataValue::Missing,
    ]));
    assert!(reduce_trace(&trace, &mut LayoutContext::new()).is_none());

    let empty = resolve(PieTraceSpec::new(Vec::<f64>::new()));
    assert!(reduce_trace(&empty, &mut LayoutContext::new()).is_none());
}

#[test]
fn hidden_trace_is_skipped_without_touching_colors() {
    let mut spec = PieTraceSpec::new([1.0]).with_labels(["a"]);
    spec.visible = Some(false);
    let trace = resolve(spec);

    let mut ctx = LayoutContext::new();
    assert!(reduce_trace(&trace, &mut ctx).is_none());
    assert!(ctx.color_map().is_empty());
    assert_eq!(ctx.default_color_count(), 0);
}

#[test]
fn default_colors_follow_display_order() {
    let trace = resolve(PieTraceSpec::new([1.0, 3.0, 2.0]).with_labels(["a", "b", "c"]));
    let mut ctx = LayoutContext::new();
    let reduced = reduce_trace(&trace, &mut ctx).expect("visible trace");

    let palette = slice_palette(&base_palette());
    let labels: Vec<&str> = reduced.slices.iter().map(|s| s.label.as_str()).collect();
    let colors: Vec<Color> = reduced.slices.iter().map(|s| s.color).collect();
    assert_eq!(labels, vec!["b", "c", "a"]);
    assert_eq!(colors, palette[..3].to_vec());
    assert_eq!(ctx.default_color_count(), 3);
}

#[test]
fn explicit_color_is_reused_for_the_same_label_in_later_traces() {
    let first = resolve(
        PieTraceSpec::new([1.0, 1.0])
            .with_labels(["a", "b"])
            .with_colors(["#ff0000", "not-a-color"])
            .with_sort(false),
    );
    let second = resolve(PieTraceSpec::new([5.0, 1.0]).with_labels(["b", "a"]));

    let mut ctx = LayoutContext::new();
    let first = reduce_trace(&first, &mut ctx).expect("first visible");
    let second = reduce_trace(&second, &mut ctx).expect("second visible");

    let red = Color::rgb(1.0, 0.0, 0.0);
    assert_eq!(first.slices[0].color, red);
    let second_a = second
        .slices
        .iter()
        .find(|slice| slice.label == "a")
        .expect("label a");
    assert_eq!(second_a.color, red);

    let first_b = first.slices[1].color;
    let second_b = second
        .slices
        .iter()
        .find(|slice| slice.label == "b")
        .expect("label b");
    assert_eq!(second_b.color, first_b);
    assert_eq!(ctx.default_color_count(), 1);
}

#[test]
fn percent_text_is_rounded_to_three_significant_digits() {
    let trace = resolve(
        PieTraceSpec::new([1.0, 2.0])
            .with_sort(false)
            .with_text_info(TextInfo::PERCENT),
    );
    let reduced = reduce_trace(&trace, &mut LayoutContext::new()).expect("visible trace");
    assert_eq!(reduced.slices[0].text.as_deref(), Some("33.3%"));
    assert_eq!(reduced.slices[1].text.as_deref(), Some("66.7%"));

    let halves = resolve(PieTraceSpec::new([2.0, 2.0]));
    let reduced = reduce_trace(&halves, &mut LayoutContext::new()).expect("visible trace");
    assert_eq!(reduced.slices[0].text.as_deref(), Some("50%"));
}

#[test]
fn halfway_percent_text_rounds_up() {
    let trace = resolve(PieTraceSpec::new([1.0, 31.0]).with_sort(false));
    let reduced = reduce_trace(&trace, &mut LayoutContext::new()).expect("visible trace");
    assert_eq!(reduced.slices[0].text.as_deref(), Some("3.13%"));
    assert_eq!(reduced.slices[1].text.as_deref(), Some("96.9%"));
}

#[test]
fn zero_total_gives_zero_percent_text() {
    let trace = resolve(PieTraceSpec::new([0.0, 0.0]).with_labels(["a", "b"]));
    let reduced = reduce_trace(&trace, &mut LayoutContext::new()).expect("visible trace");
    assert_eq!(reduced.total, 0.0);
    for slice in &reduced.slices {
        assert_eq!(slice.text.as_deref(), Some("0%"));
    }
}

#[test]
fn custom_text_is_looked_up_by_source_index() {
    let trace = resolve(
        PieTraceSpec::new([1.0, 9.0])
            .with_text(["small", "big"])
            .with_text_info("text".parse::<TextInfo>().expect("flags")),
    );
    let reduced = reduce_trace(&trace, &mut LayoutContext::new()).expect("visible trace");
    assert_eq!(reduced.slices[0].index, 1);
    assert_eq!(reduced.slices[0].text.as_deref(), Some("big"));
    assert_eq!(reduced.slices[1].text.as_deref(), Some("small"));
}

use super::*;

#[derive(Default)]
struct Recorder {
    log: Vec<String>,
}

impl PaintSurface for Recorder {
    fn paint(&mut self, x: u32, y: u32, rgb: Rgb8) {
        self.log.push(format!("{x},{y}={rgb}"));
    }

    fn clear(&mut self) {
        self.log.push("clear".to_string());
    }
}

#[test]
fn apply_plan_preserves_order() {
    let mut plan = FramePlan::new();
    plan.push_pixel(0, 0, Rgb8::new(1, 2, 3));
    plan.push_clear();
    plan.push_pixel(1, 0, Rgb8::black());

    let mut rec = Recorder::default();
    apply_plan(&mut rec, &plan);
    assert_eq!(
        rec.log,
        vec!["0,0=rgb(1, 2, 3)", "clear", "1,0=rgb(0, 0, 0)"]
    );
    assert_eq!(plan.pixel_count(), 2);
    assert_eq!(plan.clear_count(), 1);
}

#[test]
fn plan_serializes_tagged_ops() {
    let mut plan = FramePlan::new();
    plan.push_clear();
    plan.push_pixel(2, 3, Rgb8::new(9, 9, 9));
    let v = serde_json::to_value(&plan).unwrap();
    assert_eq!(v["ops"][0]["op"], "clear");
    assert_eq!(v["ops"][1]["op"], "pixel");
    assert_eq!(v["ops"][1]["x"], 2);
    assert_eq!(v["ops"][1]["rgb"]["g"], 9);
}

use super::*;

#[test]
fn reset_keeps_cursor_kind() {
    let mut c = ScheduleCursor::Linear { offset: 9 };
    c.reset();
    assert_eq!(c, ScheduleCursor::linear());

    let mut c = ScheduleCursor::Pass {
        pass: 2,
        pos: 4,
        pending_clear: true,
    };
    c.reset();
    assert_eq!(c, ScheduleCursor::pass());
}

#[test]
fn percent_rounds_to_nearest() {
    let p = Progress {
        painted: 2,
        total: 3,
    };
    assert_eq!(p.percent(), 67);
    assert_eq!(p.to_string(), "printed 2/3 (67%)");
    assert!(!p.is_done());

    let third = Progress {
        painted: 1,
        total: 3,
    };
    assert_eq!(third.percent(), 33);
}

#[test]
fn percent_reaches_100_only_when_done() {
    let almost = Progress {
        painted: 199,
        total: 200,
    };
    assert_eq!(almost.percent(), 99);
    let done = Progress {
        painted: 200,
        total: 200,
    };
    assert_eq!(done.percent(), 100);
}

#[test]
fn empty_image_is_done() {
    let p = Progress::default();
    assert_eq!(p.percent(), 100);
    assert_eq!(p.fraction(), 1.0);
    assert!(p.is_done());
}

#[test]
fn cursor_kind_follows_mode() {
    assert_eq!(ScheduleCursor::for_mode(DrawMode::Red), ScheduleCursor::linear());
    assert_eq!(ScheduleCursor::for_mode(DrawMode::Palette), ScheduleCursor::pass());

    let mut c = ScheduleCursor::pass();
    *c.offset_mut() = 4;
    assert_eq!(c, ScheduleCursor::Linear { offset: 4 });

    let (pass, _, pending) = c.pass_parts();
    *pass = 2;
    *pending = true;
    assert_eq!(
        c,
        ScheduleCursor::Pass {
            pass: 2,
            pos: 0,
            pending_clear: true
        }
    );
}

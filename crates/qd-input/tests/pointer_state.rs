//! Integration tests: event sequences through the frame/input engine.
//!
//! Each test drives `process_*` entry points the way a host shell would —
//! a batch of events, then one draw tick per frame — and checks the
//! derived edge-detectors and emitted events.

use qd_core::Point;
use qd_input::{
    ButtonEvent, Consumer, DragEvent, DrawerInput, KeyCode, KeyEventData, KeyPhase, MouseEventData,
    MousePhase, OwnerToken, TouchEventData, TouchPhase,
};
use std::cell::RefCell;
use std::rc::Rc;

const LEFT: i16 = 0;

fn mouse(pos: (f64, f64), button: i16) -> MouseEventData {
    MouseEventData {
        pos: Point::new(pos.0, pos.1),
        button,
    }
}

fn touch(id: u64, pos: (f64, f64)) -> TouchEventData {
    TouchEventData {
        id,
        pos: Point::new(pos.0, pos.1),
    }
}

// ─── Button edge detection ───────────────────────────────────────────────

#[test]
fn click_without_drag() {
    let mut input = DrawerInput::new();

    input.process_mouse_event(MousePhase::Down, mouse((0.0, 0.0), LEFT));
    assert!(input.mouse.left.pressed());
    assert!(!input.mouse.left.released());
    input.process_draw_event(Some(16.0));
    assert!(!input.mouse.left.pressed(), "pressed leaked past its frame");

    // Jitter below the drag threshold.
    for x in [3.0, 5.0, 7.0] {
        input.process_mouse_event(MousePhase::Move, mouse((x, 0.0), LEFT));
        assert!(!input.mouse.left.dragging);
        input.process_draw_event(Some(16.0));
    }
    assert!(!input.mouse.left.drag_start());
    assert!(!input.mouse.left.drag_end());

    input.process_mouse_event(MousePhase::Up, mouse((7.0, 0.0), LEFT));
    assert!(input.mouse.left.released());
    assert!(input.mouse.left.clicked(), "a non-drag release is a click");
    assert!(!input.mouse.left.drag_end());

    input.process_draw_event(Some(16.0));
    assert!(!input.mouse.left.released());
    assert!(!input.mouse.left.clicked());
}

#[test]
fn drag_past_threshold() {
    let mut input = DrawerInput::new();
    let owner = OwnerToken::new();

    let starts: Rc<RefCell<Vec<ButtonEvent>>> = Rc::new(RefCell::new(Vec::new()));
    let drags: Rc<RefCell<Vec<DragEvent>>> = Rc::new(RefCell::new(Vec::new()));
    let sequence: Rc<RefCell<Vec<&'static str>>> = Rc::new(RefCell::new(Vec::new()));

    {
        let starts = Rc::clone(&starts);
        input
            .mouse
            .left
            .on_drag_start
            .subscribe(&owner, move |e: &ButtonEvent| starts.borrow_mut().push(*e));
        let drags = Rc::clone(&drags);
        input
            .mouse
            .left
            .on_drag
            .subscribe(&owner, move |e: &DragEvent| drags.borrow_mut().push(*e));
        let up_seq = Rc::clone(&sequence);
        input
            .mouse
            .left
            .on_up
            .subscribe(&owner, move |_: &ButtonEvent| up_seq.borrow_mut().push("up"));
        let end_seq = Rc::clone(&sequence);
        input
            .mouse
            .left
            .on_drag_end
            .subscribe(&owner, move |_: &ButtonEvent| {
                end_seq.borrow_mut().push("drag_end")
            });
    }

    input.process_mouse_event(MousePhase::Down, mouse((0.0, 0.0), LEFT));
    input.process_draw_event(Some(16.0));

    input.process_mouse_event(MousePhase::Move, mouse((100.0, 0.0), LEFT));
    assert!(input.mouse.left.dragging);
    assert!(input.mouse.left.drag_start());

    // Drag start carries the origin, not the current position.
    assert_eq!(starts.borrow().as_slice(), &[ButtonEvent { pos: Point::ZERO }]);
    // The first drag spans origin → current.
    {
        let drags = drags.borrow();
        assert_eq!(drags.len(), 1);
        assert_eq!(drags[0].pos, Point::new(100.0, 0.0));
        assert_eq!(drags[0].delta, Point::new(100.0, 0.0));
        assert_eq!(drags[0].last_pos, Point::ZERO);
    }

    input.process_draw_event(Some(16.0));
    assert!(!input.mouse.left.drag_start(), "drag_start leaked past its frame");

    input.process_mouse_event(MousePhase::Up, mouse((100.0, 0.0), LEFT));
    assert!(!input.mouse.left.dragging);
    assert!(input.mouse.left.drag_end());
    assert!(input.mouse.left.released());
    assert!(!input.mouse.left.clicked(), "a drag release is not a click");
    assert_eq!(sequence.borrow().as_slice(), &["up", "drag_end"]);

    input.process_draw_event(Some(16.0));
    assert!(!input.mouse.left.drag_end());
}

#[test]
fn subsequent_drag_events_carry_per_move_deltas() {
    let mut input = DrawerInput::new();
    let owner = OwnerToken::new();
    let drags: Rc<RefCell<Vec<DragEvent>>> = Rc::new(RefCell::new(Vec::new()));
    {
        let drags = Rc::clone(&drags);
        input
            .mouse
            .left
            .on_drag
            .subscribe(&owner, move |e: &DragEvent| drags.borrow_mut().push(*e));
    }

    input.process_mouse_event(MousePhase::Down, mouse((0.0, 0.0), LEFT));
    input.process_mouse_event(MousePhase::Move, mouse((50.0, 0.0), LEFT));
    input.process_mouse_event(MousePhase::Move, mouse((53.0, 4.0), LEFT));

    let drags = drags.borrow();
    assert_eq!(drags.len(), 2);
    assert_eq!(drags[0].delta, Point::new(50.0, 0.0));
    assert_eq!(drags[1].delta, Point::new(3.0, 4.0));
    assert_eq!(drags[1].last_pos, Point::new(50.0, 0.0));
}

#[test]
fn any_button_tracks_alongside_specific_buttons() {
    let mut input = DrawerInput::new();

    input.process_mouse_event(MousePhase::Down, mouse((5.0, 5.0), LEFT));
    assert!(input.mouse.left.pressed());
    assert!(input.mouse.any.pressed());
    assert!(!input.mouse.right.pressed());

    input.process_draw_event(Some(16.0));
    input.process_mouse_event(MousePhase::Up, mouse((5.0, 5.0), LEFT));
    assert!(input.mouse.left.released());
    assert!(input.mouse.any.released());
}

#[test]
fn leave_force_releases_and_parks_position() {
    let mut input = DrawerInput::new();
    let owner = OwnerToken::new();
    let ups: Rc<RefCell<usize>> = Rc::new(RefCell::new(0));
    {
        let ups = Rc::clone(&ups);
        input
            .mouse
            .left
            .on_up
            .subscribe(&owner, move |_: &ButtonEvent| *ups.borrow_mut() += 1);
    }

    input.process_mouse_event(MousePhase::Down, mouse((5.0, 5.0), LEFT));
    input.process_draw_event(Some(16.0));
    assert!(input.mouse.over);

    input.process_mouse_event(MousePhase::Leave, mouse((0.0, 0.0), LEFT));
    assert!(!input.mouse.over);
    assert!(input.mouse.pos.is_nan());
    assert!(!input.mouse.left.down);
    assert!(input.mouse.left.released());
    assert_eq!(*ups.borrow(), 1);

    input.process_mouse_event(MousePhase::Enter, mouse((3.0, 3.0), LEFT));
    assert!(input.mouse.over);
    assert_eq!(input.mouse.pos, Point::new(3.0, 3.0));
}

// ─── Frame boundary ──────────────────────────────────────────────────────

#[test]
fn previous_fields_advance_only_in_the_draw_tick() {
    let mut input = DrawerInput::new();

    input.process_mouse_event(MousePhase::Down, mouse((0.0, 0.0), LEFT));
    input.process_mouse_event(MousePhase::Move, mouse((2.0, 0.0), LEFT));
    input.process_mouse_event(MousePhase::Move, mouse((4.0, 0.0), LEFT));

    // No tick yet: the edge is still visible.
    assert!(input.mouse.left.pressed());
    assert!(!input.mouse.left.last_down);
    assert_eq!(input.mouse.last_pos, Point::ZERO);

    input.process_draw_event(Some(16.0));
    assert!(input.mouse.left.last_down);
    assert!(!input.mouse.left.pressed());
    assert_eq!(input.mouse.last_pos, Point::new(4.0, 0.0));
}

#[test]
fn per_frame_mouse_delta_spans_the_whole_frame() {
    let mut input = DrawerInput::new();

    input.process_mouse_event(MousePhase::Move, mouse((5.0, 0.0), LEFT));
    input.process_mouse_event(MousePhase::Move, mouse((7.0, 3.0), LEFT));
    input.process_draw_event(Some(16.0));

    assert_eq!(input.mouse.delta, Point::new(7.0, 3.0));
    assert_eq!(input.mouse.last_pos, Point::new(7.0, 3.0));
}

#[test]
fn wheel_accumulates_per_frame_and_resets_on_tick() {
    let mut input = DrawerInput::new();

    input.process_wheel_event(Point::new(3.0, 0.0));
    input.process_wheel_event(Point::new(-1.0, 2.0));
    assert_eq!(input.mouse.wheel_delta, Point::new(2.0, 2.0));

    input.process_draw_event(Some(16.0));
    assert_eq!(input.mouse.wheel_delta, Point::ZERO);
}

#[test]
fn explicit_delta_accumulates_deterministic_time() {
    let mut input = DrawerInput::new();
    assert_eq!(input.time(), None);

    input.process_draw_event(Some(16.0));
    input.process_draw_event(Some(4.0));
    assert_eq!(input.delta_time, 4.0);
    assert_eq!(input.time(), Some(20.0));
}

#[test]
fn draw_event_fires_with_the_given_delta() {
    let mut input = DrawerInput::new();
    let owner = OwnerToken::new();
    let deltas: Rc<RefCell<Vec<f64>>> = Rc::new(RefCell::new(Vec::new()));
    {
        let deltas = Rc::clone(&deltas);
        input
            .on_draw
            .subscribe(&owner, move |e: &qd_input::FrameEvent| {
                deltas.borrow_mut().push(e.delta_time)
            });
    }

    input.process_draw_event(Some(16.0));
    input.process_draw_event(Some(33.0));
    assert_eq!(*deltas.borrow(), vec![16.0, 33.0]);
}

// ─── Keyboard ────────────────────────────────────────────────────────────

#[test]
fn key_edges_follow_the_frame_model() {
    let mut input = DrawerInput::new();
    let code = KeyCode::intern("KeyW");

    input.process_keyboard_event(
        KeyPhase::Down,
        KeyEventData {
            code,
            from_text_input: false,
        },
    );
    assert!(input.keyboard.key(code).pressed());

    input.process_draw_event(Some(16.0));
    assert!(!input.keyboard.key(code).pressed());
    assert!(input.keyboard.key(code).down);

    input.process_keyboard_event(
        KeyPhase::Up,
        KeyEventData {
            code,
            from_text_input: false,
        },
    );
    assert!(input.keyboard.key(code).released());
}

#[test]
fn text_input_keys_are_ignored_unless_captured() {
    let mut input = DrawerInput::new();
    let code = KeyCode::intern("KeyT");

    input.process_keyboard_event(
        KeyPhase::Down,
        KeyEventData {
            code,
            from_text_input: true,
        },
    );
    assert!(input.keyboard.get(code).is_none(), "text-input event leaked");

    input.capture_text_input = true;
    input.process_keyboard_event(
        KeyPhase::Down,
        KeyEventData {
            code,
            from_text_input: true,
        },
    );
    assert!(input.keyboard.key(code).down);
}

// ─── Touch ───────────────────────────────────────────────────────────────

#[test]
fn touch_lifecycle() {
    let mut input = DrawerInput::new();
    let owner = OwnerToken::new();
    let moves: Rc<RefCell<Vec<qd_input::TouchMoveEvent>>> = Rc::new(RefCell::new(Vec::new()));
    let ends: Rc<RefCell<Vec<qd_input::TouchEvent>>> = Rc::new(RefCell::new(Vec::new()));
    {
        let moves = Rc::clone(&moves);
        input
            .touch
            .on_move
            .subscribe(&owner, move |e: &qd_input::TouchMoveEvent| {
                moves.borrow_mut().push(*e)
            });
        let ends = Rc::clone(&ends);
        input
            .touch
            .on_end
            .subscribe(&owner, move |e: &qd_input::TouchEvent| {
                ends.borrow_mut().push(*e)
            });
    }

    input.process_touch_event(TouchPhase::Start, touch(1, (10.0, 10.0)));
    assert_eq!(input.touch.count(), 1);
    // Seeded so the first move against the seed has zero frame delta.
    assert_eq!(
        input.touch.get(1).map(|p| p.last_pos),
        Some(Point::new(10.0, 10.0))
    );

    input.process_touch_event(TouchPhase::Move, touch(1, (12.0, 10.0)));
    assert_eq!(moves.borrow()[0].delta, Point::new(2.0, 0.0));

    input.process_touch_event(TouchPhase::End, touch(1, (12.0, 10.0)));
    assert_eq!(ends.borrow().len(), 1);
    assert_eq!(input.touch.count(), 0, "point must be destroyed after the end event");
}

#[test]
fn unknown_touch_identifiers_are_ignored() {
    let mut input = DrawerInput::new();
    input.process_touch_event(TouchPhase::Move, touch(42, (1.0, 1.0)));
    input.process_touch_event(TouchPhase::End, touch(42, (1.0, 1.0)));
    assert_eq!(input.touch.count(), 0);
}

#[test]
fn multi_touch_points_are_independent() {
    let mut input = DrawerInput::new();
    input.process_touch_event(TouchPhase::Start, touch(1, (0.0, 0.0)));
    input.process_touch_event(TouchPhase::Start, touch(2, (50.0, 50.0)));
    assert_eq!(input.touch.count(), 2);

    input.process_touch_event(TouchPhase::Move, touch(2, (55.0, 50.0)));
    assert_eq!(input.touch.get(1).map(|p| p.pos), Some(Point::ZERO));
    assert_eq!(input.touch.get(2).map(|p| p.pos), Some(Point::new(55.0, 50.0)));

    input.process_touch_event(TouchPhase::End, touch(1, (0.0, 0.0)));
    assert_eq!(input.touch.count(), 1);
}

// ─── Consumers ───────────────────────────────────────────────────────────

#[test]
fn disposed_consumer_receives_no_further_events() {
    let mut input = DrawerInput::new();
    let calls: Rc<RefCell<usize>> = Rc::new(RefCell::new(0));

    let mut consumer = Consumer::new("counter", &mut input, |consumer, input| {
        let calls = Rc::clone(&calls);
        input.on_draw.subscribe(consumer.owner(), move |_| {
            *calls.borrow_mut() += 1
        });
    });

    input.process_draw_event(Some(16.0));
    assert_eq!(*calls.borrow(), 1);

    consumer.dispose();
    input.process_draw_event(Some(16.0));
    assert_eq!(*calls.borrow(), 1);
}

#[test]
fn consumer_disposed_mid_dispatch_never_hears_the_event() {
    let mut input = DrawerInput::new();
    let calls: Rc<RefCell<usize>> = Rc::new(RefCell::new(0));

    // The victim must be constructed first so we can capture its handle,
    // but subscribe *after* the disposer.
    let victim: Rc<RefCell<Option<Consumer>>> = Rc::new(RefCell::new(None));

    let victim_handle = Rc::clone(&victim);
    let _disposer = Consumer::new("disposer", &mut input, move |consumer, input| {
        input.on_draw.subscribe(consumer.owner(), move |_| {
            if let Some(victim) = victim_handle.borrow_mut().as_mut() {
                victim.dispose();
            }
        });
    });

    let calls_clone = Rc::clone(&calls);
    let late = Consumer::new("victim", &mut input, move |consumer, input| {
        input.on_draw.subscribe(consumer.owner(), move |_| {
            *calls_clone.borrow_mut() += 1
        });
    });
    *victim.borrow_mut() = Some(late);

    input.process_draw_event(Some(16.0));
    assert_eq!(
        *calls.borrow(),
        0,
        "a consumer disposed mid-dispatch must not receive a late callback"
    );
}

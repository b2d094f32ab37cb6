//! A terminal walk-through of the keyboard manager: mounts a refill-request
//! form, moves focus around, taps keys, and prints what the host would
//! render after each step.

use std::rc::Rc;
use std::thread::sleep;
use std::time::Duration;

use tapboard_core::prelude::*;
use tapboard_ui::{Handedness, Keyboard, ViewKind, with_handedness};

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let registry = Rc::new(FieldRegistry::new());
    let queue = Rc::new(TaskQueue::new());

    let form = registry.register_form(|| println!(">> form submitted"));
    let name_field = Field::new(FieldKind::Text).form(form);
    let name_value = name_field.value.clone();
    let name = registry.mount(name_field);
    let dose_field = Field::new(FieldKind::Text).mode(InputMode::Decimal).form(form);
    let dose_value = dose_field.value.clone();
    let dose = registry.mount(dose_field);
    let phone = registry.mount(Field::new(FieldKind::Telephone).form(form));
    let email = registry.mount(Field::new(FieldKind::Email).form(form));
    let notes_field = Field::new(FieldKind::Text).attrs(FieldAttrs::MULTI_LINE);
    let notes_value = notes_field.value.clone();
    let notes = registry.mount(notes_field);

    let manager = Rc::new(
        KeyboardManager::new(registry.clone(), queue.clone())
            .on_scroll_into_view(|id| log::info!("scroll {id:?} into view"))
            .on_lock_scroll(|on| println!(">> background scroll {}", if on { "locked" } else { "unlocked" })),
    );

    manager.state().watch().subscribe(|phase| match phase {
        KeyboardPhase::Hidden => println!(">> keyboard hidden"),
        KeyboardPhase::Visible { layout, .. } => println!(">> keyboard up: {layout:?}"),
    });

    // the host reads its handedness preference from wherever settings live
    let hand = if std::env::var_os("TAPBOARD_LEFT_HAND").is_some() {
        Handedness::Left
    } else {
        Handedness::Right
    };

    println!("-- focus the name field, type a value");
    manager.focus_in(name);
    type_str(&manager, "lisinopril");
    println!("name = {:?}", name_value.get());

    println!("-- move straight to the dose field (no hidden flicker)");
    manager.focus_out(name);
    manager.focus_in(dose);
    type_str(&manager, "2.5");
    println!("dose = {:?}", dose_value.get());
    render(&manager, hand);

    println!("-- phone and email pick their layouts from field metadata");
    manager.focus_out(dose);
    manager.focus_in(phone);
    render(&manager, hand);
    manager.focus_out(phone);
    manager.focus_in(email);
    render(&manager, hand);

    println!("-- enter in the multi-line notes field inserts a newline");
    manager.focus_out(email);
    manager.focus_in(notes);
    type_str(&manager, "take with food");
    manager.key_press(Keystroke::Enter);
    type_str(&manager, "morning only");
    println!("notes = {:?}", notes_value.get());

    println!("-- enter on a single-line field submits the owning form");
    manager.focus_out(notes);
    manager.focus_in(name);
    manager.key_press(Keystroke::Enter);

    println!("-- done closes immediately");
    manager.close_now();
    pump(&queue);

    println!("-- a blur with no follow-up focus closes after the grace delay");
    manager.focus_in(name);
    manager.focus_out(name);
    pump(&queue);
    println!("visible after pump: {}", manager.state().phase().is_visible());

    Ok(())
}

fn type_str(manager: &KeyboardManager, s: &str) {
    for c in s.chars() {
        manager.key_press(Keystroke::Char(c));
    }
}

/// Let the grace/scroll delays elapse, then run whatever came due.
fn pump(queue: &TaskQueue) {
    sleep(Duration::from_millis(350));
    queue.run_due();
}

fn render(manager: &Rc<KeyboardManager>, hand: Handedness) {
    let Some(sheet) = with_handedness(hand, || Keyboard(manager)) else {
        return;
    };
    for row in &sheet.children {
        let labels: Vec<&str> = row
            .children
            .iter()
            .filter_map(|k| match &k.kind {
                ViewKind::Key { spec, .. } => Some(spec.label.as_str()),
                _ => None,
            })
            .collect();
        println!("   [{}]", labels.join("]["));
    }
}

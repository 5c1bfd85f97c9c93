use winit::event::{ElementState, KeyEvent, WindowEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

use crate::input::{InputEvent, Key, KeyState, TextEvent};

/// Translates a winit `WindowEvent` into engine `InputEvent`s.
///
/// A key press that also produced text yields both a `Key` and a `Text`
/// event, in that order. Non-keyboard events yield nothing.
pub fn translate_window_event(event: &WindowEvent) -> Vec<InputEvent> {
    match event {
        WindowEvent::KeyboardInput { event, .. } => translate_key_event(event),

        WindowEvent::Ime(winit::event::Ime::Commit(text)) if !text.is_empty() => {
            vec![InputEvent::Text(TextEvent { text: text.clone() })]
        }

        _ => Vec::new(),
    }
}

fn translate_key_event(event: &KeyEvent) -> Vec<InputEvent> {
    let state = match event.state {
        ElementState::Pressed => KeyState::Pressed,
        ElementState::Released => KeyState::Released,
    };

    let mut out = vec![InputEvent::Key {
        key: map_key(event.physical_key),
        state,
        repeat: event.repeat,
    }];

    if state == KeyState::Pressed {
        if let Some(text) = event.text.as_ref().filter(|t| !t.is_empty()) {
            out.push(InputEvent::Text(TextEvent { text: text.to_string() }));
        }
    }

    out
}

pub fn map_key(pk: PhysicalKey) -> Key {
    match pk {
        PhysicalKey::Code(KeyCode::Escape) => Key::Escape,
        PhysicalKey::Code(KeyCode::KeyQ) => Key::Q,
        PhysicalKey::Code(other) => Key::Unknown(other as u32),
        // NativeKeyCode is not a u32 in winit 0.30; no stable numeric to keep.
        PhysicalKey::Unidentified(_) => Key::Unknown(0),
    }
}

//! Recorded input scripts replayed through the camera without a window.
//!
//! One event per line:
//!
//! ```text
//! # comment
//! cursor 600 400        # absolute cursor position
//! key w down            # press / release a movement key
//! frame 0.016           # advance one frame, moving for held keys
//! move forward 0.5      # direct camera move for dt seconds
//! scroll 1              # zoom in by one notch
//! ```

use std::path::{Path, PathBuf};

use corelib::{Camera, CameraMovement, InputState, Key};
use thiserror::Error;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum InputEvent {
    Move(CameraMovement, f32),
    Cursor(f32, f32),
    Scroll(f32),
    Key(Key, bool),
    Frame(f32),
}

#[derive(Debug, Error)]
pub enum ScriptError {
    #[error("failed to read input script {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("input script line {line_no} ({reason}): '{line}'")]
    Parse {
        line_no: usize,
        line: String,
        reason: String,
    },
}

pub fn load_script(path: impl AsRef<Path>) -> Result<Vec<InputEvent>, ScriptError> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path).map_err(|source| ScriptError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_script(&text)
}

pub fn parse_script(text: &str) -> Result<Vec<InputEvent>, ScriptError> {
    let mut events = Vec::new();
    for (line_no, raw) in text.lines().enumerate() {
        let line = raw.split('#').next().unwrap_or_default().trim();
        if line.is_empty() {
            continue;
        }
        let event = parse_event(line).map_err(|reason| ScriptError::Parse {
            line_no: line_no + 1,
            line: raw.trim().to_owned(),
            reason,
        })?;
        events.push(event);
    }
    Ok(events)
}

fn parse_event(line: &str) -> Result<InputEvent, String> {
    let words: Vec<&str> = line.split_whitespace().collect();
    match words.as_slice() {
        ["move", dir, dt] => Ok(InputEvent::Move(parse_direction(dir)?, parse_num(dt)?)),
        ["cursor", x, y] => Ok(InputEvent::Cursor(parse_num(x)?, parse_num(y)?)),
        ["scroll", dy] => Ok(InputEvent::Scroll(parse_num(dy)?)),
        ["key", name, state] => {
            let key = Key::from_name(name).ok_or_else(|| format!("unknown key '{name}'"))?;
            let pressed = match *state {
                "down" | "press" => true,
                "up" | "release" => false,
                other => return Err(format!("unknown key state '{other}'")),
            };
            Ok(InputEvent::Key(key, pressed))
        }
        ["frame", dt] => Ok(InputEvent::Frame(parse_num(dt)?)),
        [cmd, ..] => Err(format!("unknown command '{cmd}' or wrong argument count")),
        [] => Err("empty event".to_owned()),
    }
}

fn parse_direction(word: &str) -> Result<CameraMovement, String> {
    match word.to_ascii_lowercase().as_str() {
        "forward" => Ok(CameraMovement::Forward),
        "backward" => Ok(CameraMovement::Backward),
        "left" => Ok(CameraMovement::Left),
        "right" => Ok(CameraMovement::Right),
        "up" => Ok(CameraMovement::Up),
        "down" => Ok(CameraMovement::Down),
        other => Err(format!("unknown direction '{other}'")),
    }
}

fn parse_num(word: &str) -> Result<f32, String> {
    word.parse::<f32>()
        .map_err(|e| format!("invalid number '{word}': {e}"))
}

/// Feeds events into the input context. Returns the number of frames played.
pub fn replay(events: &[InputEvent], input: &mut InputState, camera: &mut Camera) -> usize {
    let mut frames = 0;
    for event in events {
        match *event {
            InputEvent::Move(dir, dt) => camera.move_by(dir, dt),
            InputEvent::Cursor(x, y) => input.cursor_moved(camera, x, y),
            InputEvent::Scroll(dy) => input.scroll(camera, dy),
            InputEvent::Key(key, pressed) => input.set_key(key, pressed),
            InputEvent::Frame(dt) => {
                input.apply_movement(camera, dt);
                frames += 1;
            }
        }
    }
    frames
}

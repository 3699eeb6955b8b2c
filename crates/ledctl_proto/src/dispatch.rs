//! Address parsing and argument validation: the literal address table,
//! the `/palette/{P}/{C}` wildcard pattern, and the rule that literal
//! addresses are tried before wildcard ones.

use regex::Regex;
use rosc::OscType;
use std::sync::OnceLock;

use ledctl_core::PaletteId;

use crate::command::Command;
use crate::error::{ProtoError, Result};

fn palette_address_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^/palette/([A-E])/([0-5])$").expect("static regex is valid"))
}

fn as_int(address: &'static str, args: &[OscType], index: usize) -> Result<i32> {
    match args.get(index) {
        Some(OscType::Int(v)) => Ok(*v),
        Some(_) => Err(ProtoError::WrongArgType { address, index }),
        None => Err(ProtoError::WrongArity {
            address,
            expected: index + 1,
            got: args.len(),
        }),
    }
}

fn as_string(address: &'static str, args: &[OscType], index: usize) -> Result<String> {
    match args.get(index) {
        Some(OscType::String(s)) => Ok(s.clone()),
        Some(_) => Err(ProtoError::WrongArgType { address, index }),
        None => Err(ProtoError::WrongArity {
            address,
            expected: index + 1,
            got: args.len(),
        }),
    }
}

fn require_arity(address: &'static str, args: &[OscType], expected: usize) -> Result<()> {
    if args.len() != expected {
        return Err(ProtoError::WrongArity {
            address,
            expected,
            got: args.len(),
        });
    }
    Ok(())
}

/// Parses an inbound address plus its OSC argument list into a validated
/// [`Command`]. Literal addresses (`/load_json`, `/change_scene`, ...) are
/// checked before the `/palette/{P}/{C}` wildcard pattern.
pub fn parse(address: &str, args: &[OscType]) -> Result<Command> {
    match address {
        "/load_json" => {
            require_arity("/load_json", args, 1)?;
            Ok(Command::LoadJson(as_string("/load_json", args, 0)?))
        }
        "/change_scene" => {
            require_arity("/change_scene", args, 1)?;
            let v = as_int("/change_scene", args, 0)?;
            let id = u32::try_from(v).map_err(|_| ProtoError::OutOfRange {
                address: "/change_scene",
                value: v.to_string(),
            })?;
            Ok(Command::ChangeScene(id))
        }
        "/change_effect" => {
            require_arity("/change_effect", args, 1)?;
            let v = as_int("/change_effect", args, 0)?;
            let id = u32::try_from(v).map_err(|_| ProtoError::OutOfRange {
                address: "/change_effect",
                value: v.to_string(),
            })?;
            Ok(Command::ChangeEffect(id))
        }
        "/change_palette" => {
            require_arity("/change_palette", args, 1)?;
            let s = as_string("/change_palette", args, 0)?;
            let id = PaletteId::parse(&s).ok_or(ProtoError::OutOfRange {
                address: "/change_palette",
                value: s,
            })?;
            Ok(Command::ChangePalette(id))
        }
        "/set_dissolve_time" => {
            require_arity("/set_dissolve_time", args, 1)?;
            let v = as_int("/set_dissolve_time", args, 0)?;
            Ok(Command::SetDissolveTime(v.max(0) as u64))
        }
        "/set_speed_percent" => {
            require_arity("/set_speed_percent", args, 1)?;
            let v = as_int("/set_speed_percent", args, 0)?;
            Ok(Command::SetSpeedPercent(v.clamp(0, 200) as u32))
        }
        "/master_brightness" => {
            require_arity("/master_brightness", args, 1)?;
            let v = as_int("/master_brightness", args, 0)?;
            Ok(Command::MasterBrightness(v.clamp(0, 255) as u8))
        }
        other => {
            log::trace!("{other} not in the literal address table, trying the palette wildcard");
            parse_palette_color(other, args)
        }
    }
}

fn parse_palette_color(address: &str, args: &[OscType]) -> Result<Command> {
    let caps = palette_address_regex()
        .captures(address)
        .ok_or_else(|| ProtoError::UnknownAddress(address.to_string()))?;

    const ADDR: &str = "/palette/{P}/{C}";
    require_arity(ADDR, args, 3)?;

    let palette_id =
        PaletteId::from_char(caps[1].chars().next().expect("regex guarantees one char"))
            .expect("regex class [A-E] guarantees a valid palette id");
    let color_id: usize = caps[2].parse().expect("regex class [0-5] guarantees a digit");

    let r = as_int(ADDR, args, 0)?;
    let g = as_int(ADDR, args, 1)?;
    let b = as_int(ADDR, args, 2)?;

    Ok(Command::UpdatePaletteColor {
        palette_id,
        color_id,
        r,
        g,
        b,
    })
}

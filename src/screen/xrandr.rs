//! Turning a [`ScreenSetup`] into xrandr arguments
//!
//! Every connector the server reported gets an `--output` block so the
//! result does not depend on whatever was configured before: either
//! `--mode WxH --pos XxY` or `--off`.

use super::{RelativeScreenPosition, Resolution, ScreenSetup, ScreenSituation};

/// Top-left corner of a screen in the combined framebuffer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    pub x: u32,
    pub y: u32,
}

impl Position {
    const ORIGIN: Position = Position { x: 0, y: 0 };
}

/// Where the internal and external screen end up. Coordinates never go
/// negative, so for LEFT/ABOVE the internal screen is shifted instead.
pub fn layout(setup: &ScreenSetup) -> (Option<Position>, Option<Position>) {
    match (setup.int_resolution(), setup.ext_resolution()) {
        (Some(int), Some(ext)) => {
            let (int_pos, ext_pos) = relative_positions(
                int,
                ext,
                setup.rel_position().unwrap_or(RelativeScreenPosition::Mirror),
            );
            (Some(int_pos), Some(ext_pos))
        }
        (Some(_), None) => (Some(Position::ORIGIN), None),
        (None, Some(_)) => (None, Some(Position::ORIGIN)),
        (None, None) => (None, None),
    }
}

fn relative_positions(
    int: Resolution,
    ext: Resolution,
    position: RelativeScreenPosition,
) -> (Position, Position) {
    let origin = Position::ORIGIN;
    match position {
        RelativeScreenPosition::Right => (origin, Position { x: int.width, y: 0 }),
        RelativeScreenPosition::Left => (Position { x: ext.width, y: 0 }, origin),
        RelativeScreenPosition::Below => (origin, Position { x: 0, y: int.height }),
        RelativeScreenPosition::Above => (Position { x: 0, y: ext.height }, origin),
        RelativeScreenPosition::Mirror => (origin, origin),
    }
}

/// Arguments for xrandr, without the program name
pub fn xrandr_args(situation: &ScreenSituation, setup: &ScreenSetup) -> Vec<String> {
    let internal = &situation.internal_connector().name;
    let external = situation.external_connector().map(|c| &c.name);
    let (int_pos, ext_pos) = layout(setup);
    let primary = if setup.int_resolution().is_some() {
        Some(internal)
    } else {
        external
    };

    let mut args = Vec::new();
    for name in situation.connectors() {
        args.push("--output".to_string());
        args.push(name.clone());

        let enabled = if name == internal {
            setup.int_resolution().zip(int_pos)
        } else if Some(name) == external {
            setup.ext_resolution().zip(ext_pos)
        } else {
            None
        };

        match enabled {
            Some((res, pos)) => {
                args.extend([
                    "--mode".to_string(),
                    res.to_string(),
                    "--pos".to_string(),
                    format!("{}x{}", pos.x, pos.y),
                ]);
                if Some(name) == primary {
                    args.push("--primary".to_string());
                }
            }
            None => args.push("--off".to_string()),
        }
    }
    args
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::screen::situation::common_internal_connector_names;
    use crate::screen::situation::tests::output;

    fn res(w: u32, h: u32) -> Resolution {
        Resolution::new(w, h)
    }

    fn two_screens() -> ScreenSituation {
        ScreenSituation::new(
            vec![
                output("eDP", true, &[(1920, 1080)]),
                output("HDMI-1", true, &[(1920, 1080), (1280, 1024)]),
                output("DP-1", false, &[]),
            ],
            &common_internal_connector_names(),
            None,
        )
        .unwrap()
    }

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_internal_only_disables_everything_else() {
        let situation = ScreenSituation::new(
            vec![
                output("eDP", true, &[(1920, 1080), (1366, 768)]),
                output("HDMI-1", false, &[]),
                output("VGA-1", false, &[]),
            ],
            &common_internal_connector_names(),
            None,
        )
        .unwrap();
        let setup = ScreenSetup::internal_only(res(1920, 1080));

        assert_eq!(
            xrandr_args(&situation, &setup),
            args(&[
                "--output", "eDP", "--mode", "1920x1080", "--pos", "0x0", "--primary",
                "--output", "HDMI-1", "--off",
                "--output", "VGA-1", "--off",
            ])
        );
    }

    #[test]
    fn test_right_places_external_after_internal_width() {
        let setup =
            ScreenSetup::both(res(1920, 1080), res(1920, 1080), RelativeScreenPosition::Right);
        assert_eq!(
            xrandr_args(&two_screens(), &setup),
            args(&[
                "--output", "eDP", "--mode", "1920x1080", "--pos", "0x0", "--primary",
                "--output", "HDMI-1", "--mode", "1920x1080", "--pos", "1920x0",
                "--output", "DP-1", "--off",
            ])
        );
    }

    #[test]
    fn test_external_only_turns_internal_off() {
        let setup = ScreenSetup::external_only(res(1280, 1024));
        assert_eq!(
            xrandr_args(&two_screens(), &setup),
            args(&[
                "--output", "eDP", "--off",
                "--output", "HDMI-1", "--mode", "1280x1024", "--pos", "0x0", "--primary",
                "--output", "DP-1", "--off",
            ])
        );
    }

    #[test]
    fn test_layout_for_each_position() {
        let int = res(1920, 1080);
        let ext = res(1280, 1024);
        let at = |x, y| Some(Position { x, y });
        let origin = at(0, 0);

        let cases = [
            (RelativeScreenPosition::Right, origin, at(1920, 0)),
            (RelativeScreenPosition::Left, at(1280, 0), origin),
            (RelativeScreenPosition::Below, origin, at(0, 1080)),
            (RelativeScreenPosition::Above, at(0, 1024), origin),
        ];
        for (position, int_pos, ext_pos) in cases {
            assert_eq!(layout(&ScreenSetup::both(int, ext, position)), (int_pos, ext_pos));
        }
        assert_eq!(layout(&ScreenSetup::mirror(ext)), (origin, origin));
    }

    #[test]
    fn test_every_connector_appears_once() {
        let situation = two_screens();
        let setups = [
            ScreenSetup::internal_only(res(1920, 1080)),
            ScreenSetup::external_only(res(1920, 1080)),
            ScreenSetup::mirror(res(1920, 1080)),
            ScreenSetup::both(res(1920, 1080), res(1280, 1024), RelativeScreenPosition::Above),
        ];
        for setup in setups {
            let out = xrandr_args(&situation, &setup);
            assert_eq!(out, xrandr_args(&situation, &setup));
            for name in situation.connectors() {
                let count = out
                    .windows(2)
                    .filter(|w| w[0] == "--output" && &w[1] == name)
                    .count();
                assert_eq!(count, 1, "{name} in {out:?}");
            }
        }
    }
}

//! Outfield dimensions of the major league parks the spray chart can be
//! drawn for.

/// Wall distances in feet down the lines and to straightaway center.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ballpark {
    pub name: &'static str,
    pub left_field: f64,
    pub center_field: f64,
    pub right_field: f64,
}

const fn park(name: &'static str, left_field: f64, center_field: f64, right_field: f64) -> Ballpark {
    Ballpark {
        name,
        left_field,
        center_field,
        right_field,
    }
}

/// Every selectable park. The first one is the default.
pub const BALLPARKS: [Ballpark; 29] = [
    park("Truist Park (Braves)", 335.0, 400.0, 325.0),
    park("Oriole Park (Orioles)", 333.0, 400.0, 318.0),
    park("Fenway Park (Red Sox)", 310.0, 390.0, 302.0),
    park("Wrigley Field (Cubs)", 355.0, 400.0, 353.0),
    park("Guaranteed Rate Field (White Sox)", 330.0, 400.0, 335.0),
    park("Great American Ball Park (Reds)", 328.0, 404.0, 325.0),
    park("Progressive Field (Guardians)", 325.0, 400.0, 325.0),
    park("Coors Field (Rockies)", 347.0, 415.0, 350.0),
    park("Comerica Park (Tigers)", 342.0, 412.0, 330.0),
    park("Minute Maid Park (Astros)", 315.0, 409.0, 326.0),
    park("Kauffman Stadium (Royals)", 330.0, 410.0, 330.0),
    park("Angel Stadium (Angels)", 347.0, 396.0, 350.0),
    park("Dodger Stadium (Dodgers)", 330.0, 400.0, 330.0),
    park("LoanDepot Park (Marlins)", 344.0, 407.0, 335.0),
    park("American Family Field (Brewers)", 344.0, 400.0, 345.0),
    park("Target Field (Twins)", 339.0, 403.0, 328.0),
    park("Citi Field (Mets)", 335.0, 408.0, 330.0),
    park("Yankee Stadium (Yankees)", 318.0, 408.0, 314.0),
    park("Oakland Coliseum (Athletics)", 330.0, 400.0, 330.0),
    park("Citizens Bank Park (Phillies)", 329.0, 401.0, 330.0),
    park("PNC Park (Pirates)", 325.0, 399.0, 320.0),
    park("Petco Park (Padres)", 334.0, 396.0, 322.0),
    park("Oracle Park (Giants)", 339.0, 399.0, 309.0),
    park("T-Mobile Park (Mariners)", 331.0, 401.0, 326.0),
    park("Busch Stadium (Cardinals)", 336.0, 400.0, 335.0),
    park("Tropicana Field (Rays)", 315.0, 404.0, 322.0),
    park("Globe Life Field (Rangers)", 329.0, 407.0, 326.0),
    park("Rogers Centre (Blue Jays)", 328.0, 400.0, 328.0),
    park("Nationals Park (Nationals)", 336.0, 402.0, 335.0),
];

impl Ballpark {
    /// Index of the park whose name matches, ignoring ASCII case.
    pub fn position(name: &str) -> Option<usize> {
        BALLPARKS
            .iter()
            .position(|park| park.name.eq_ignore_ascii_case(name.trim()))
    }

    /// Wall distance at a spray angle in degrees, negative toward left
    /// field. Runs from the foul pole at ±45° to center at 0°; angles past
    /// the poles are held at the pole distance.
    pub fn fence_distance(&self, degrees: f64) -> f64 {
        let degrees = degrees.clamp(-45.0, 45.0);
        let pole = if degrees < 0.0 {
            self.left_field
        } else {
            self.right_field
        };
        pole + (self.center_field - pole) * (2.0 * degrees).to_radians().cos()
    }
}

impl Default for Ballpark {
    fn default() -> Self {
        BALLPARKS[0]
    }
}

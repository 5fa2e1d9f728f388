//! Surface cards.
//!
//! A surface card names a geometric boundary: an optional boundary prefix,
//! the surface number, an optional transformation number, a mnemonic and the
//! coefficients that mnemonic expects.
//!
//! ```text
//! *10 3 pz 20.0     reflective z-plane at 20, transformed by tr3
//! 1 so 5.0          sphere of radius 5 about the origin
//! 2 rpp -1 1 -1 1 -1 1
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

use super::entity::{EntityKind, Identified};
use super::real::Real;

/// Boundary condition carried by the surface number prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Boundary {
    #[default]
    Vacuum,
    /// `*` prefix.
    Reflective,
    /// `+` prefix.
    White,
}

impl Boundary {
    /// Prefix written in front of the surface number.
    pub fn prefix(&self) -> &'static str {
        match self {
            Boundary::Vacuum => "",
            Boundary::Reflective => "*",
            Boundary::White => "+",
        }
    }
}

macro_rules! surface_kinds {
    ($($variant:ident => $mnemonic:literal [$($count:literal),+]),+ $(,)?) => {
        /// The closed set of recognized surface mnemonics.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum SurfaceKind {
            $(
                #[serde(rename = $mnemonic)]
                $variant,
            )+
        }

        impl SurfaceKind {
            /// Every kind, in table order.
            pub const ALL: &'static [SurfaceKind] = &[$(SurfaceKind::$variant),+];

            /// Canonical (lower-case) mnemonic.
            pub fn mnemonic(&self) -> &'static str {
                match self {
                    $(SurfaceKind::$variant => $mnemonic,)+
                }
            }

            /// Coefficient counts this kind accepts.
            pub fn arity(&self) -> &'static [usize] {
                match self {
                    $(SurfaceKind::$variant => &[$($count),+],)+
                }
            }
        }
    };
}

surface_kinds! {
    Plane => "p" [4, 9],
    PlaneX => "px" [1],
    PlaneY => "py" [1],
    PlaneZ => "pz" [1],
    SphereOrigin => "so" [1],
    Sphere => "s" [4],
    SphereX => "sx" [2],
    SphereY => "sy" [2],
    SphereZ => "sz" [2],
    CylinderParallelX => "c/x" [3],
    CylinderParallelY => "c/y" [3],
    CylinderParallelZ => "c/z" [3],
    CylinderX => "cx" [1],
    CylinderY => "cy" [1],
    CylinderZ => "cz" [1],
    ConeParallelX => "k/x" [4, 5],
    ConeParallelY => "k/y" [4, 5],
    ConeParallelZ => "k/z" [4, 5],
    ConeX => "kx" [2, 3],
    ConeY => "ky" [2, 3],
    ConeZ => "kz" [2, 3],
    SpecialQuadric => "sq" [10],
    GeneralQuadric => "gq" [10],
    TorusX => "tx" [6],
    TorusY => "ty" [6],
    TorusZ => "tz" [6],
    AxisPointsX => "x" [2, 4, 6],
    AxisPointsY => "y" [2, 4, 6],
    AxisPointsZ => "z" [2, 4, 6],
    Box => "box" [9, 12],
    RectangularPrism => "rpp" [6],
    SphereBody => "sph" [4],
    RightCircularCylinder => "rcc" [7],
    HexagonalPrism => "rhp" [9, 15],
    EllipticalCylinder => "rec" [10, 12],
    TruncatedCone => "trc" [8],
    Ellipsoid => "ell" [7],
    Wedge => "wed" [12],
    ArbitraryPolyhedron => "arb" [30],
}

impl SurfaceKind {
    /// Resolve a mnemonic, case-insensitively. `hex` is accepted as an
    /// alias of `rhp`.
    pub fn from_mnemonic(mnemonic: &str) -> Option<Self> {
        let lower = mnemonic.to_ascii_lowercase();
        if lower == "hex" {
            return Some(SurfaceKind::HexagonalPrism);
        }
        Self::ALL.iter().copied().find(|k| k.mnemonic() == lower)
    }

    /// Whether `count` coefficients are valid for this kind.
    pub fn accepts(&self, count: usize) -> bool {
        self.arity().contains(&count)
    }

    /// Macrobodies have numbered facets that cells may reference (`-3.2`).
    pub fn is_macrobody(&self) -> bool {
        matches!(
            self,
            SurfaceKind::Box
                | SurfaceKind::RectangularPrism
                | SurfaceKind::SphereBody
                | SurfaceKind::RightCircularCylinder
                | SurfaceKind::HexagonalPrism
                | SurfaceKind::EllipticalCylinder
                | SurfaceKind::TruncatedCone
                | SurfaceKind::Ellipsoid
                | SurfaceKind::Wedge
                | SurfaceKind::ArbitraryPolyhedron
        )
    }

    /// Human-readable arity, e.g. "4 or 9".
    pub fn arity_description(&self) -> String {
        let counts: Vec<String> = self.arity().iter().map(|c| c.to_string()).collect();
        counts.join(" or ")
    }
}

impl fmt::Display for SurfaceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.mnemonic().to_ascii_uppercase())
    }
}

/// A surface definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Surface {
    /// Surface number (unique among surfaces).
    pub id: u32,
    pub kind: SurfaceKind,
    /// Coefficients in card order; count and meaning depend on `kind`.
    pub coefficients: Vec<Real>,
    /// Number of the `tr` card applied to this surface.
    #[serde(default)]
    pub transform: Option<u32>,
    #[serde(default)]
    pub boundary: Boundary,
}

impl Surface {
    /// Create a vacuum-bounded, untransformed surface.
    pub fn new(id: u32, kind: SurfaceKind, coefficients: impl IntoIterator<Item = f64>) -> Self {
        Self {
            id,
            kind,
            coefficients: coefficients.into_iter().map(Real).collect(),
            transform: None,
            boundary: Boundary::Vacuum,
        }
    }

    /// Sphere of radius `r` centred on the origin.
    pub fn sphere_at_origin(id: u32, r: f64) -> Self {
        Self::new(id, SurfaceKind::SphereOrigin, [r])
    }

    pub fn with_transform(mut self, transform: u32) -> Self {
        self.transform = Some(transform);
        self
    }

    pub fn with_boundary(mut self, boundary: Boundary) -> Self {
        self.boundary = boundary;
        self
    }

    /// Whether the coefficient count matches the kind's arity.
    pub fn has_valid_arity(&self) -> bool {
        self.kind.accepts(self.coefficients.len())
    }
}

impl Identified for Surface {
    const KIND: EntityKind = EntityKind::Surface;

    fn id(&self) -> u32 {
        self.id
    }
}

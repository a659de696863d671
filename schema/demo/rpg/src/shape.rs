use respack::prelude::*;

/// Collision shapes. `Shape` itself is abstract.
pub const SHAPES: VariantSet = VariantSet::new(
    "Shape",
    &["Ball", "Cuboid", "Capsule", "Cone", "Cylinder", "Plane", "TriMesh"],
);

///
/// ShapeKind
///

#[derive(Clone, Debug, PartialEq)]
pub enum ShapeKind {
    Ball { radius: f64 },
    Cuboid { x: f64, y: f64, z: f64 },
    Capsule { half_height: f64, radius: f64 },
    Cone { half_height: f64, radius: f64 },
    Cylinder { half_height: f64, radius: f64 },
    Plane { nx: f64, ny: f64, nz: f64 },
    TriMesh { file: String, name: String },
}

impl ShapeKind {
    #[must_use]
    pub const fn tag(&self) -> &'static str {
        match self {
            Self::Ball { .. } => "Ball",
            Self::Cuboid { .. } => "Cuboid",
            Self::Capsule { .. } => "Capsule",
            Self::Cone { .. } => "Cone",
            Self::Cylinder { .. } => "Cylinder",
            Self::Plane { .. } => "Plane",
            Self::TriMesh { .. } => "TriMesh",
        }
    }

    fn fields(&self, path: &FieldPath) -> Result<FieldMap, ValidateError> {
        let extent = |name: &'static str, value: f64| {
            expect_float(&value, &path.field(name), Rule::new().min(0.0))
        };
        let axis = |name: &'static str, value: f64| {
            expect_float(&value, &path.field(name), Rule::new())
        };

        let fields = match self {
            Self::Ball { radius } => FieldMap::new().with("radius", extent("radius", *radius)?),
            Self::Cuboid { x, y, z } => FieldMap::new()
                .with("x", extent("x", *x)?)
                .with("y", extent("y", *y)?)
                .with("z", extent("z", *z)?),
            Self::Capsule {
                half_height,
                radius,
            }
            | Self::Cone {
                half_height,
                radius,
            }
            | Self::Cylinder {
                half_height,
                radius,
            } => FieldMap::new()
                .with("half_height", extent("half_height", *half_height)?)
                .with("radius", extent("radius", *radius)?),
            Self::Plane { nx, ny, nz } => FieldMap::new()
                .with("nx", axis("nx", *nx)?)
                .with("ny", axis("ny", *ny)?)
                .with("nz", axis("nz", *nz)?),
            Self::TriMesh { file, name } => FieldMap::new()
                .with("file", expect_string(file, &path.field("file"), Rule::new())?)
                .with("name", expect_string(name, &path.field("name"), Rule::new())?),
        };

        Ok(fields)
    }
}

///
/// Shape
/// A shape kind placed by an optional translation and rotation.
///

#[derive(Clone, Debug, PartialEq)]
pub struct Shape {
    pub kind: ShapeKind,
    pub translation: Option<[f64; 3]>,
    pub rotation: Option<[f64; 3]>,
}

impl Shape {
    #[must_use]
    pub const fn new(kind: ShapeKind) -> Self {
        Self {
            kind,
            translation: None,
            rotation: None,
        }
    }

    #[must_use]
    pub const fn ball(radius: f64) -> Self {
        Self::new(ShapeKind::Ball { radius })
    }

    #[must_use]
    pub const fn capsule(half_height: f64, radius: f64) -> Self {
        Self::new(ShapeKind::Capsule {
            half_height,
            radius,
        })
    }

    #[must_use]
    pub const fn at(mut self, translation: [f64; 3]) -> Self {
        self.translation = Some(translation);
        self
    }

    /// Parse a loosely declared shape mapping keyed by `"type"`.
    pub fn from_value(value: &Value, path: &FieldPath) -> Result<Self, ValidateError> {
        let tag = SHAPES.tag_of(value, path)?;
        let float = |name: &'static str| {
            let field = path.field(name);
            require(
                expect_float(&value.get(name), &field, Rule::new())?,
                &field,
                f64::EXPECTED,
            )
        };
        let string = |name: &'static str| {
            let field = path.field(name);
            require(expect_string(&value.get(name), &field, Rule::new())?, &field, "a str")
        };

        let kind = match tag {
            "Ball" => ShapeKind::Ball {
                radius: float("radius")?,
            },
            "Cuboid" => ShapeKind::Cuboid {
                x: float("x")?,
                y: float("y")?,
                z: float("z")?,
            },
            "Capsule" => ShapeKind::Capsule {
                half_height: float("half_height")?,
                radius: float("radius")?,
            },
            "Cone" => ShapeKind::Cone {
                half_height: float("half_height")?,
                radius: float("radius")?,
            },
            "Cylinder" => ShapeKind::Cylinder {
                half_height: float("half_height")?,
                radius: float("radius")?,
            },
            "Plane" => ShapeKind::Plane {
                nx: float("nx")?,
                ny: float("ny")?,
                nz: float("nz")?,
            },
            _ => ShapeKind::TriMesh {
                file: string("file")?,
                name: string("name")?,
            },
        };

        let placement = |name: &'static str| {
            expect_number_vec::<f64, _>(&value.get(name), 3, &path.field(name), Rule::new().optional())
                .map(|v| v.and_then(|v| <[f64; 3]>::try_from(v).ok()))
        };

        Ok(Self {
            kind,
            translation: placement("translation")?,
            rotation: placement("rotation")?,
        })
    }

    pub fn serialize(&self, path: &FieldPath) -> Result<Value, ValidateError> {
        let placement = |name: &'static str, value: &Option<[f64; 3]>| {
            expect_number_vec(value, 3, &path.field(name), Rule::<f64>::new().optional())
        };

        let fields = self
            .kind
            .fields(path)?
            .with("translation", placement("translation", &self.translation)?)
            .with("rotation", placement("rotation", &self.rotation)?);

        Ok(tagged(self.kind.tag(), fields).finish())
    }
}

///
/// TESTS
///

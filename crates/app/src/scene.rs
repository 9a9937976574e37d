//! Hand-scripted city scene: which models to load and where they stand.

use std::path::{Path, PathBuf};

use asset::primitives::{FLOOR_VERTICES, SKYBOX_VERTICES};
use asset::{CubemapData, LoadError, MeshVertex, TextureData, load_obj_from_path};
use corelib::{Transform, Vec3};
use rand::{Rng, SeedableRng, rngs::StdRng};

const BUILDING_SCALE: f32 = 0.5;
const HUMAN_SCALE: f32 = 0.8;
const DOG_SCALE: f32 = 0.7;
const HUMAN_MAX_TURN_DEG: f32 = 45.0;

/// `(name, directory, obj file, base-colour texture)`
const HUMANS: [(&str, &str, &str, &str); 10] = [
    ("Liam Human", "human_liam", "liam_human.obj", "liam_BaseColor.png"),
    ("John Human", "human_john", "john_human.obj", "john_BaseColor.png"),
    ("Human Andrew", "human_andrew", "andrew_human.obj", "andrew_BaseColor.png"),
    ("Human Phil", "human_phil", "phil_human.obj", "phil_BaseColor.png"),
    ("Women Juliette", "human_juliette", "juliette_human.obj", "juliette_BaseColor.png"),
    ("Svenja Human", "human_svenja", "svenja_human.obj", "svenja_BaseColor.png"),
    ("Human Kim", "human_kim", "kim_human.obj", "kim_BaseColor.png"),
    ("Human Lisa", "human_lisa", "lisa_human.obj", "lisa_BaseColor.png"),
    ("Human Francine", "human_francine", "francine_human.obj", "francine_BaseColor.png"),
    ("Human Myriam", "human_myriam", "myriam_human.obj", "myriam_BaseColor.png"),
];

/// Spots around the square, assigned to humans in order.
const HUMAN_SPOTS: [(f32, f32, f32); 10] = [
    (-3.0, 0.0, 5.0),
    (3.0, 0.0, 4.0),
    (0.0, 0.0, 8.0),
    (2.0, 0.0, 10.0),
    (-5.0, 0.0, 7.0),
    (7.0, 0.0, 6.0),
    (-1.0, 0.0, 12.0),
    (4.0, 0.0, 3.0),
    (-6.0, 0.0, 9.0),
    (0.0, 0.0, 2.0),
];

/// What to load for one model and where to put it.
#[derive(Clone, Debug, PartialEq)]
pub struct ModelSpec {
    pub name: String,
    pub obj: PathBuf,
    pub texture: Option<PathBuf>,
    pub transform: Transform,
}

impl ModelSpec {
    fn new(name: &str, root: &Path, dir: &str, obj: &str, texture: &str, transform: Transform) -> Self {
        let dir = root.join(dir);
        Self {
            name: name.to_owned(),
            obj: dir.join(obj),
            texture: Some(dir.join(texture)),
            transform,
        }
    }
}

/// Builds the city layout rooted at `root`. Human headings are random but
/// reproducible for a given `seed`.
pub fn city_layout(root: &Path, seed: u64) -> Vec<ModelSpec> {
    let up = Vec3::Y;
    let placed = |x, y, z, scale: f32, turn_deg| {
        Transform::at(x, y, z)
            .scale(Vec3::splat(scale))
            .rotate_degrees(turn_deg, up)
    };

    let mut specs = vec![
        ModelSpec::new(
            "Hotel Building Old",
            root,
            "HotelBuildingOld",
            "HotelBuildingOld.obj",
            "Hotel_BaseColor.png",
            placed(-15.0, 0.0, -15.0, BUILDING_SCALE * 1.2, 45.0),
        ),
        ModelSpec::new(
            "Old City Buildings",
            root,
            "OldCityBuildings",
            "OldCityBuildings.obj",
            "OldCity_BaseColor.png",
            placed(15.0, 0.0, -20.0, BUILDING_SCALE * 1.5, -30.0),
        ),
        ModelSpec::new(
            "Church",
            root,
            "Church",
            "Church.obj",
            "Church_BaseColor.png",
            placed(-20.0, 0.0, 10.0, BUILDING_SCALE * 1.3, 15.0),
        ),
    ];

    let mut rng = StdRng::seed_from_u64(seed);
    for (i, (name, dir, obj, tex)) in HUMANS.iter().enumerate() {
        let (x, y, z) = HUMAN_SPOTS[i % HUMAN_SPOTS.len()];
        let turn = rng.random_range(-HUMAN_MAX_TURN_DEG..=HUMAN_MAX_TURN_DEG);
        specs.push(ModelSpec::new(name, root, dir, obj, tex, placed(x, y, z, HUMAN_SCALE, turn)));
    }

    specs.push(ModelSpec::new(
        "German Shepherd Dog",
        root,
        "german_shepherd",
        "german_shepherd.obj",
        "Dog_BaseColor.png",
        placed(-1.0, 0.0, 7.0, DOG_SCALE, 30.0),
    ));
    specs
}

/// A mesh flattened for drawing, with its single texture and placement.
#[derive(Clone, Debug)]
pub struct Model {
    pub name: String,
    pub vertices: Vec<MeshVertex>,
    pub texture: Option<TextureData>,
    pub transform: Transform,
}

impl Model {
    /// Mesh failures are returned; a texture failure only leaves the model
    /// untextured.
    pub fn load(spec: &ModelSpec) -> Result<Self, LoadError> {
        let mesh = load_obj_from_path(&spec.obj)?;
        let vertices = mesh.to_vertex_buffer();

        let texture = spec.texture.as_ref().and_then(|path| match TextureData::load(path) {
            Ok(tex) => Some(tex),
            Err(err) => {
                log::warn!("{}: drawing untextured ({})", spec.name, err);
                None
            }
        });

        Ok(Self {
            name: spec.name.clone(),
            vertices,
            texture,
            transform: spec.transform,
        })
    }

    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }
}

#[derive(Clone, Debug)]
pub struct Scene {
    pub models: Vec<Model>,
    /// The floor is only drawn when its texture loaded.
    pub floor_texture: Option<TextureData>,
    pub skybox: Option<CubemapData>,
}

impl Scene {
    pub fn floor_vertices(&self) -> &'static [MeshVertex] {
        if self.floor_texture.is_some() {
            &FLOOR_VERTICES
        } else {
            &[]
        }
    }

    pub fn skybox_vertices(&self) -> &'static [[f32; 3]] {
        match &self.skybox {
            Some(sky) if sky.loaded_faces() > 0 => &SKYBOX_VERTICES,
            _ => &[],
        }
    }

    /// Everything drawn per frame: models, floor and skybox.
    pub fn vertex_count(&self) -> usize {
        self.models.iter().map(Model::vertex_count).sum::<usize>()
            + self.floor_vertices().len()
            + self.skybox_vertices().len()
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct LoadReport {
    pub loaded: Vec<String>,
    /// `(model name, reason)`
    pub skipped: Vec<(String, String)>,
}

/// Loads every model of the layout, skipping the ones that fail.
pub fn assemble(root: &Path, seed: u64) -> (Scene, LoadReport) {
    let mut report = LoadReport::default();
    let mut models = Vec::new();

    for spec in city_layout(root, seed) {
        log::info!("Loading {} from {:?}", spec.name, spec.obj);
        match Model::load(&spec) {
            Ok(model) => {
                report.loaded.push(model.name.clone());
                models.push(model);
            }
            Err(err) => {
                log::warn!("Skipping {}: {}", spec.name, err);
                report.skipped.push((spec.name, err.to_string()));
            }
        }
    }

    let floor_texture = match TextureData::load(root.join("textures").join("city_ground.jpg")) {
        Ok(tex) => Some(tex),
        Err(err) => {
            log::warn!("City floor disabled: {}", err);
            None
        }
    };

    let skybox_paths = CubemapData::face_paths(root.join("skybox"), "jpg");
    let skybox = match CubemapData::load(&skybox_paths) {
        Ok(sky) => Some(sky),
        Err(err) => {
            log::warn!("Skybox disabled: {}", err);
            None
        }
    };

    (
        Scene {
            models,
            floor_texture,
            skybox,
        },
        report,
    )
}

use glam::{Vec2, Vec3};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use edu_viz::catalog::{CONTINENTS, ORBITS};
use edu_viz::core::picking::{to_ndc, SurfaceRect};
use edu_viz::core::scene_graph::{Material, Node, SceneGraph, Transform};
use edu_viz::core::window::WindowDimensions;
use edu_viz::geometry::mesh::uv_sphere;
use edu_viz::math::{Ray, Rgb};
use edu_viz::scenes::{GlobeModel, SolarModel};

fn project(view_proj: glam::Mat4, point: Vec3) -> Vec2 {
    view_proj.project_point3(point).truncate()
}

#[cfg(test)]
mod picking_tests {
    use super::*;

    #[test]
    fn test_surface_corners_and_center() {
        let rect = SurfaceRect::from_size(800.0, 600.0);
        assert_eq!(to_ndc((0.0, 0.0), rect), Vec2::new(-1.0, 1.0));
        assert_eq!(to_ndc((800.0, 600.0), rect), Vec2::new(1.0, -1.0));
        assert_eq!(to_ndc((400.0, 300.0), rect), Vec2::ZERO);
    }

    #[test]
    fn test_zero_sized_surface_uses_fallback() {
        let ndc = to_ndc((400.0, 300.0), SurfaceRect::from_size(0.0, 0.0));
        assert_eq!(ndc, Vec2::ZERO, "an empty surface is treated as 800x600");
    }

    #[test]
    fn test_nearest_pickable_wins() {
        let mut graph = SceneGraph::new();
        let sphere = graph.add_mesh(uv_sphere(1.0, 16, 16));
        graph.add(
            Node::mesh("far", sphere, Material::lit(Rgb::WHITE))
                .with_transform(Transform::at(Vec3::new(0.0, 0.0, -10.0)))
                .pickable("far"),
        );
        graph.add(
            Node::mesh("near", sphere, Material::lit(Rgb::WHITE))
                .with_transform(Transform::at(Vec3::new(0.0, 0.0, -4.0)))
                .pickable("near"),
        );
        graph.add(
            Node::mesh("decor", sphere, Material::lit(Rgb::WHITE))
                .with_transform(Transform::at(Vec3::new(0.0, 0.0, -2.0))),
        );

        let ray = Ray::new(Vec3::ZERO, Vec3::NEG_Z);
        let hit = graph.pick(&ray).expect("ray should hit a pickable sphere");
        assert_eq!(hit.id, "near", "non-pickable nodes are ignored");
        assert!((hit.distance - 3.0).abs() < 0.05);

        let miss = Ray::new(Vec3::ZERO, Vec3::X);
        assert!(graph.pick(&miss).is_none());
    }

    #[test]
    fn test_every_planet_is_clickable_at_start() {
        for orbit in ORBITS.iter() {
            let mut model = SolarModel::new(WindowDimensions::new(1280, 800));
            let position = model.planet_position(orbit.id).unwrap();
            let ndc = project(model.camera().view_proj(), position);
            let record = model.click(ndc);
            assert_eq!(record.map(|p| p.id), Some(orbit.id), "clicking {} should select it", orbit.id);
        }
    }

    #[test]
    fn test_clicking_space_closes_planet_info() {
        let mut model = SolarModel::new(WindowDimensions::new(1280, 800));
        let ndc = project(model.camera().view_proj(), model.planet_position("mars").unwrap());
        model.click(ndc);
        assert!(model.selected().is_some());

        model.click(Vec2::new(-0.98, 0.98));
        assert!(model.selected().is_none(), "a miss clears the selection");
    }

    #[test]
    fn test_front_marker_selects_its_continent() {
        let mut model = GlobeModel::new(WindowDimensions::new(1280, 800), true, ChaCha8Rng::seed_from_u64(7));
        let eye = model.camera().eye();
        let front = CONTINENTS
            .iter()
            .max_by(|a, b| {
                let da = model.marker_world_position(a.name).unwrap().distance(eye);
                let db = model.marker_world_position(b.name).unwrap().distance(eye);
                db.total_cmp(&da)
            })
            .unwrap();

        let ndc = project(model.camera().view_proj(), model.marker_world_position(front.name).unwrap());
        let record = model.click(ndc).expect("the nearest marker should be hit");
        assert_eq!(record.name, front.name);
        assert_eq!(model.state.selected.map(|c| c.name), Some(front.name));
        assert_eq!(model.state.fact_index, 0);
    }

    #[test]
    fn test_bare_globe_click_clears_selection() {
        let mut model = GlobeModel::new(WindowDimensions::new(1280, 800), true, ChaCha8Rng::seed_from_u64(7));
        model.state.select(&CONTINENTS[0]);

        // straight below the center is ocean far from every marker
        assert!(model.click(Vec2::new(0.0, -0.35)).is_none());
        assert!(model.state.selected.is_none());
    }
}

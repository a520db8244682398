use edu_viz::catalog::ShapeKind;
use edu_viz::core::window::WindowDimensions;
use edu_viz::math::Rgb;
use edu_viz::prefs::Preferences;
use edu_viz::scenes::geometry_explorer::{MAX_SCALE, MIN_SCALE};
use edu_viz::scenes::{ExplorerModel, ExplorerState};

#[cfg(test)]
mod explorer_tests {
    use super::*;

    fn model() -> ExplorerModel {
        ExplorerModel::new(ExplorerState::default(), WindowDimensions::new(1024, 768))
    }

    #[test]
    fn test_reset_restores_defaults() {
        let mut m = model();
        m.state.shape = ShapeKind::Dodecahedron;
        m.state.color = Rgb::from_u32(0xff0000);
        m.state.set_scale(1.5);
        m.state.auto_rotate = true;
        m.apply_changes();
        assert_eq!(m.state.scale_label(), "1.50×");

        m.reset();
        assert_eq!(m.state.shape, ShapeKind::Cube);
        assert_eq!(m.state.scale_label(), "1.00×");
        assert_eq!(m.state.color_label(), "#60A5FA");
        assert!(!m.state.auto_rotate);
        assert_eq!(m.shape_transform().scale.x, 1.0);
    }

    #[test]
    fn test_scale_slider_bounds() {
        let mut state = ExplorerState::default();
        state.set_scale(5.0);
        assert_eq!(state.scale, MAX_SCALE);
        state.set_scale(0.0);
        assert_eq!(state.scale, MIN_SCALE);
        state.set_scale(f32::NAN);
        assert_eq!(state.scale, MIN_SCALE, "NaN leaves the scale alone");
    }

    #[test]
    fn test_only_shape_changes_rebuild_geometry() {
        let mut m = model();
        let builds = m.mesh_builds();

        m.state.color = Rgb::from_u32(0x22c55e);
        m.state.set_scale(1.8);
        m.apply_changes();
        assert_eq!(m.mesh_builds(), builds, "color and scale edit the node in place");
        assert_eq!(m.shape_material().color, Rgb::from_u32(0x22c55e));
        assert!((m.shape_transform().scale.x - 1.8).abs() < 1e-6);

        m.state.shape = ShapeKind::Prism;
        m.apply_changes();
        m.apply_changes();
        assert_eq!(m.mesh_builds(), builds + 1);
    }

    #[test]
    fn test_stats_follow_shape_and_scale() {
        let mut state = ExplorerState::default();
        state.shape = ShapeKind::Cube;
        state.set_scale(2.0);
        assert_eq!(state.info().volume_label(), "8.00");

        state.shape = ShapeKind::Dodecahedron;
        assert_eq!(state.info().faces, 12);
        assert_eq!(state.detail().title, "Dodecaedro Místico");
    }

    #[test]
    fn test_state_round_trips_through_preferences() {
        let prefs = Preferences {
            explorer_shape: ShapeKind::Cylinder,
            explorer_color: "#a855f7".to_string(),
            explorer_scale: 9.0,
            ..Preferences::default()
        };
        let state = ExplorerState::from_preferences(&prefs);
        assert_eq!(state.shape, ShapeKind::Cylinder);
        assert_eq!(state.color_label(), "#A855F7");
        assert_eq!(state.scale, MAX_SCALE, "stored scale is clamped");

        let bad = Preferences {
            explorer_color: "not a color".to_string(),
            ..Preferences::default()
        };
        assert_eq!(ExplorerState::from_preferences(&bad), ExplorerState::default());
    }

    #[test]
    fn test_auto_rotate_orbits_camera_and_spins_shape() {
        let mut m = model();
        let start = m.camera().eye();
        m.state.auto_rotate = true;
        for _ in 0..120 {
            m.update(1.0 / 60.0);
        }
        assert!((m.camera().eye() - start).length() > 0.1, "camera should orbit the shape");
        assert!(m.shape_transform().rotation.y > 1.0, "shape should spin 0.01 rad per frame");

        m.state.auto_rotate = false;
        m.update(1.0 / 60.0);
        let stopped = m.camera().eye();
        m.update(1.0 / 60.0);
        assert!((m.camera().eye() - stopped).length() < 1e-5, "turning it off stops the orbit");
    }
}

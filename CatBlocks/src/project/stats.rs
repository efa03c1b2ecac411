//! SPDX-FileCopyrightText: 2026 `Catrobat`
//!
//! SPDX-License-Identifier: MIT
//!
//! Asset and brick counts for objects and whole programs

use super::types::{Brick, Project, SceneObject};
use serde::Serialize;
use std::ops::AddAssign;

/// Counts shown next to an object's header.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ObjectStats {
    /// Number of scripts.
    pub scripts: usize,
    /// Number of bricks, nested ones included.
    pub bricks: usize,
    /// Number of looks.
    pub looks: usize,
    /// Number of sounds.
    pub sounds: usize,
}

impl AddAssign for ObjectStats {
    fn add_assign(&mut self, rhs: Self) {
        self.scripts += rhs.scripts;
        self.bricks += rhs.bricks;
        self.looks += rhs.looks;
        self.sounds += rhs.sounds;
    }
}

/// Program-wide totals.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ProjectStats {
    /// Number of scenes.
    pub scenes: usize,
    /// Number of objects across all scenes.
    pub objects: usize,
    /// Sum of every object's counts.
    #[serde(flatten)]
    pub totals: ObjectStats,
}

fn count_bricks(bricks: &[Brick]) -> usize {
    bricks
        .iter()
        .map(|b| 1 + count_bricks(&b.body) + count_bricks(&b.else_body))
        .sum()
}

impl SceneObject {
    /// Counts this object's scripts, bricks and assets.
    #[must_use]
    pub fn stats(&self) -> ObjectStats {
        ObjectStats {
            scripts: self.scripts.len(),
            bricks: self.scripts.iter().map(|s| count_bricks(&s.bricks)).sum(),
            looks: self.looks.len(),
            sounds: self.sounds.len(),
        }
    }
}

impl Project {
    /// Totals over all scenes and objects.
    #[must_use]
    pub fn stats(&self) -> ProjectStats {
        let mut stats = ProjectStats {
            scenes: self.scenes.len(),
            ..ProjectStats::default()
        };
        for object in self.objects() {
            stats.objects += 1;
            stats.totals += object.stats();
        }
        stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::project::{File, Scene, Script};

    fn object() -> SceneObject {
        let mut forever = Brick::new("ForeverBrick");
        forever.body.push(Brick::new("MoveNStepsBrick"));
        let mut branch = Brick::new("IfLogicBeginBrick");
        branch.body.push(Brick::new("TurnLeftBrick"));
        branch.else_body.push(Brick::new("TurnRightBrick"));
        forever.body.push(branch);

        let mut script = Script::new("StartScript");
        script.bricks.push(forever);
        script.bricks.push(Brick::new("StopAllScriptsBrick"));

        let mut object = SceneObject::new("Cat");
        object.scripts.push(script);
        object.scripts.push(Script::new("WhenScript"));
        object.looks.push(File::default());
        object
    }

    #[test]
    fn test_object_stats_count_nested_bricks() {
        assert_eq!(
            object().stats(),
            ObjectStats { scripts: 2, bricks: 6, looks: 1, sounds: 0 }
        );
    }

    #[test]
    fn test_project_stats() {
        let mut scene = Scene::new("Scene 1");
        scene.objects.push(object());
        scene.objects.push(SceneObject::new("Background"));
        let project = Project { version: None, scenes: vec![scene, Scene::new("Scene 2")] };

        let stats = project.stats();
        assert_eq!(stats.scenes, 2);
        assert_eq!(stats.objects, 2);
        assert_eq!(stats.totals.bricks, 6);
        assert_eq!(stats.totals.scripts, 2);
    }
}

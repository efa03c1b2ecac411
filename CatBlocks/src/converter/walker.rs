//! SPDX-FileCopyrightText: 2026 `Catrobat`
//!
//! SPDX-License-Identifier: MIT
//!
//! Walks a Catrobat document into a [`Project`]

use roxmltree::{Document, Node};

use super::version::declared_version;
use crate::error::{Error, Result, Warning};
use crate::formats::xml::{
    child_elements, children_named, evaluate_path, find_descendant, first_child_named, text_content,
};
use crate::project::{Brick, File, Project, Scene, SceneObject, Script, escape_name};

/// Builds a [`Project`] from one document.
///
/// The walk is depth-first in document order. Problems local to one object
/// or field are recorded as [`Warning`]s and the walk carries on.
pub struct ProjectBuilder<'a, 'input> {
    doc: &'a Document<'input>,
    warnings: Vec<Warning>,
    /// Scenes sit directly under the root element (`<xml><scene type>`).
    compact: bool,
    /// Nesting level of the brick being parsed; 0 outside bricks.
    pub(super) depth: usize,
}

impl<'a, 'input> ProjectBuilder<'a, 'input> {
    /// Creates a builder over `doc`.
    #[must_use]
    pub fn new(doc: &'a Document<'input>) -> Self {
        ProjectBuilder {
            doc,
            warnings: Vec::new(),
            compact: false,
            depth: 0,
        }
    }

    /// Warnings recorded so far.
    #[must_use]
    pub fn warnings(&self) -> &[Warning] {
        &self.warnings
    }

    /// Consumes the builder, returning its warnings.
    #[must_use]
    pub fn into_warnings(self) -> Vec<Warning> {
        self.warnings
    }

    /// Logs and records a warning.
    pub fn warn(&mut self, warning: Warning) {
        tracing::warn!("{}", warning);
        self.warnings.push(warning);
    }

    /// Walks every scene.
    ///
    /// # Errors
    /// Returns [`Error::MissingSceneList`] if the document has no scene list.
    pub fn build(&mut self) -> Result<Project> {
        let scene_nodes = self.scene_nodes()?;
        tracing::debug!("Found {} scenes", scene_nodes.len());

        let mut project = Project {
            version: declared_version(self.doc),
            scenes: Vec::with_capacity(scene_nodes.len()),
        };
        for scene in scene_nodes {
            let scene = self.parse_scene(scene);
            project.scenes.push(scene);
        }
        Ok(project)
    }

    /// Children of the `scenes` element, or failing that the `scene`
    /// children of the root element.
    fn scene_nodes(&mut self) -> Result<Vec<Node<'a, 'input>>> {
        if let Some(scenes) = find_descendant(self.doc.root(), "scenes") {
            return Ok(child_elements(scenes).collect());
        }
        let scenes: Vec<Node<'a, 'input>> = children_named(self.doc.root_element(), "scene").collect();
        if scenes.is_empty() {
            return Err(Error::MissingSceneList);
        }
        self.compact = true;
        Ok(scenes)
    }

    fn parse_scene(&mut self, node: Node<'a, 'input>) -> Scene {
        let name = first_child_named(node, "name")
            .map(text_content)
            .or_else(|| node.attribute("type").map(str::to_string))
            .unwrap_or_default();
        let mut scene = Scene::new(escape_name(&name));
        tracing::debug!("Parsing scene '{}'", scene.name);

        let objects: Vec<Node<'a, 'input>> = match first_child_named(node, "objectList") {
            Some(list) => child_elements(list).collect(),
            None => children_named(node, "object").collect(),
        };
        for (index, object) in objects.into_iter().enumerate() {
            match self.parse_object(object) {
                Some(object) => scene.objects.push(object),
                None => self.warn(Warning::SkippedObject {
                    scene: scene.name.clone(),
                    position: index + 1,
                }),
            }
        }
        scene
    }

    /// Parses one object; `None` if it cannot be resolved or has no name.
    ///
    /// Program objects are named by their `name` attribute only; the `type`
    /// attribute is a sprite class there. In the compact form the object's
    /// `type` carries its name.
    fn parse_object(&mut self, node: Node<'a, 'input>) -> Option<SceneObject> {
        let node = self.flat_reference(node)?;
        let name = match node.attribute("name") {
            Some(name) => name,
            None if self.compact => node.attribute("type")?,
            None => return None,
        };
        let mut object = SceneObject::new(escape_name(name));
        tracing::debug!("Parsing object '{}'", object.name);

        object.looks = self.parse_files(node, "lookList");
        object.sounds = self.parse_files(node, "soundList");

        let scripts: Vec<Node<'a, 'input>> = match first_child_named(node, "scriptList") {
            Some(list) => child_elements(list).collect(),
            None => children_named(node, "script").collect(),
        };
        for script in scripts {
            let script = self.parse_script(script);
            object.scripts.push(script);
        }
        Some(object)
    }

    fn parse_files(&mut self, object: Node<'a, 'input>, list_tag: &str) -> Vec<File> {
        let Some(list) = first_child_named(object, list_tag) else {
            return Vec::new();
        };
        child_elements(list)
            .filter_map(|entry| self.flat_reference(entry))
            .map(|entry| {
                File::new(
                    entry.attribute("name").map(str::to_string),
                    entry.attribute("fileName").map(str::to_string),
                )
            })
            .collect()
    }

    fn parse_script(&mut self, node: Node<'a, 'input>) -> Script {
        let mut script = Script::new(escape_name(node.attribute("type").unwrap_or_default()));
        tracing::debug!("Parsing script {}", script.name);

        for child in node.children() {
            self.check_usage(child, &mut script);
        }
        if let Some(list) = first_child_named(node, "brickList") {
            for brick in child_elements(list) {
                let brick = self.parse_brick(brick);
                script.bricks.push(brick);
            }
        }
        script
    }

    /// Parses a brick and, through its branch containers, all nested bricks
    /// down to [`MAX_BRICK_DEPTH`](crate::project::MAX_BRICK_DEPTH) levels.
    pub(super) fn parse_brick(&mut self, node: Node<'a, 'input>) -> Brick {
        let mut brick = Brick::new(Brick::effective_name(node.attribute("type")));
        tracing::debug!("Parsing brick {}", brick.name);

        self.depth += 1;
        for child in node.children() {
            self.check_usage(child, &mut brick);
        }
        self.depth -= 1;
        brick
    }

    /// Follows a `reference` attribute to the node it points at.
    ///
    /// Nodes without a reference are returned unchanged. A reference that
    /// matches nothing is recorded as a warning and yields `None`.
    pub(super) fn flat_reference(&mut self, node: Node<'a, 'input>) -> Option<Node<'a, 'input>> {
        let path = match node.attribute("reference") {
            Some(path) if !path.is_empty() => path,
            _ => return Some(node),
        };
        let target = evaluate_path(node, path);
        if target.is_none() {
            self.warn(Warning::UnresolvedReference {
                path: path.to_string(),
            });
        }
        target
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formats::xml::parse_xml_document;
    use crate::project::{MAX_BRICK_DEPTH, MAX_FORMULA_NODES};
    use pretty_assertions::assert_eq;

    fn build(xml: &str) -> (Project, Vec<Warning>) {
        let doc = parse_xml_document(xml).unwrap();
        let mut builder = ProjectBuilder::new(&doc);
        let project = builder.build().unwrap();
        (project, builder.into_warnings())
    }

    #[test]
    fn test_object_without_name_is_skipped() {
        let (project, warnings) = build(
            r#"<program><scenes><scene><name>Main</name><objectList>
                 <object name="A"/>
                 <object/>
                 <object name="C"/>
               </objectList></scene></scenes></program>"#,
        );
        let names: Vec<_> = project.objects().map(|o| o.name.as_str()).collect();
        assert_eq!(names, ["A", "C"]);
        assert_eq!(
            warnings,
            vec![Warning::SkippedObject { scene: "Main".into(), position: 2 }]
        );
    }

    #[test]
    fn test_object_reference_is_flattened() {
        let (project, warnings) = build(
            r#"<program><scenes>
                 <scene><name>One</name><objectList>
                   <object name="Cat"><lookList><look name="c" fileName="c.png"/></lookList></object>
                 </objectList></scene>
                 <scene><name>Two</name><objectList>
                   <object reference="../../../scene[1]/objectList/object"/>
                   <object reference="../../../scene[7]/objectList/object"/>
                 </objectList></scene>
               </scenes></program>"#,
        );
        assert_eq!(project.scenes[1].objects.len(), 1);
        assert_eq!(project.scenes[1].objects[0].name, "Cat");
        assert_eq!(project.scenes[1].objects[0].preview_look(), Some("c.png"));
        assert_eq!(warnings.len(), 2);
        assert!(matches!(warnings[0], Warning::UnresolvedReference { .. }));
    }

    #[test]
    fn test_missing_scene_list_is_fatal() {
        let doc = parse_xml_document("<program><header/></program>").unwrap();
        let err = ProjectBuilder::new(&doc).build().unwrap_err();
        assert!(matches!(err, Error::MissingSceneList));
    }

    #[test]
    fn test_object_type_is_not_a_name() {
        let (project, warnings) = build(
            r#"<program><scenes><scene><name>Main</name><objectList>
                 <object type="Sprite" name="Cat"/>
                 <object type="Sprite"/>
                 <object type="GroupSprite"/>
               </objectList></scene></scenes></program>"#,
        );
        let names: Vec<_> = project.objects().map(|o| o.name.as_str()).collect();
        assert_eq!(names, ["Cat"]);
        assert_eq!(
            warnings,
            vec![
                Warning::SkippedObject { scene: "Main".into(), position: 2 },
                Warning::SkippedObject { scene: "Main".into(), position: 3 },
            ]
        );
    }

    #[test]
    fn test_compact_form_names_objects_by_type() {
        let (project, warnings) = build(
            r#"<xml><scene type="Level">
                 <object type="Dog"><script type="StartScript"><brickList><brick type="HideBrick"/></brickList></script></object>
                 <object name="Cat" type="Sprite"/>
                 <object/>
               </scene></xml>"#,
        );
        assert_eq!(project.scenes[0].name, "Level");
        let names: Vec<_> = project.objects().map(|o| o.name.as_str()).collect();
        assert_eq!(names, ["Dog", "Cat"]);
        assert_eq!(project.scenes[0].objects[0].scripts[0].bricks[0].name, "HideBrick");
        assert_eq!(warnings, vec![Warning::SkippedObject { scene: "Level".into(), position: 3 }]);
    }

    #[test]
    fn test_text_fields_from_program() {
        let (project, warnings) = build(
            r#"<program><scenes><scene><name>S</name><objectList><object name="O"><scriptList>
                 <script type="WhenScript"><action>Tapped</action><selection>1</selection><brickList>
                   <brick type="StopScriptBrick"><spinnerSelection>2</spinnerSelection></brick>
                   <brick type="ShowTextColorSizeAlignmentBrick"><alignmentSelection>0</alignmentSelection></brick>
                   <brick type="WebRequestBrick"><spinnerSelectionID>7</spinnerSelectionID></brick>
                   <brick type="CameraBrick"><type>front</type></brick>
                   <brick type="StopScriptBrick"><spinnerSelection/></brick>
                 </brickList></script>
               </scriptList></object></objectList></scene></scenes></program>"#,
        );
        assert!(warnings.is_empty());
        let script = &project.scenes[0].objects[0].scripts[0];
        assert_eq!(script.fields.len(), 1);
        assert_eq!(script.fields["selection"], "1");
        let fields: Vec<(&str, &str)> = script
            .bricks
            .iter()
            .flat_map(|brick| brick.fields.iter().map(|(k, v)| (k.as_str(), v.as_str())))
            .collect();
        assert_eq!(
            fields,
            [
                ("spinnerSelection", "2"),
                ("alignmentSelection", "0"),
                ("spinnerSelectionID", "7"),
                ("type", "front"),
                ("spinnerSelection", "---"),
            ]
        );
    }

    fn nested_repeats(depth: usize) -> String {
        let mut xml = String::from(
            r#"<program><scenes><scene><name>S</name><objectList><object name="O"><scriptList><script type="StartScript"><brickList>"#,
        );
        for _ in 0..depth {
            xml.push_str(r#"<brick type="RepeatBrick"><loopBricks>"#);
        }
        xml.push_str(&"</loopBricks></brick>".repeat(depth));
        xml.push_str("</brickList></script></scriptList></object></objectList></scene></scenes></program>");
        xml
    }

    fn nesting_depth(bricks: &[Brick]) -> usize {
        let mut depth = 0;
        let mut level = bricks;
        while let Some(brick) = level.first() {
            depth += 1;
            level = brick.body.as_slice();
        }
        depth
    }

    #[test]
    fn test_brick_nesting_limit() {
        let (project, warnings) = build(&nested_repeats(MAX_BRICK_DEPTH));
        assert_eq!(nesting_depth(&project.scenes[0].objects[0].scripts[0].bricks), MAX_BRICK_DEPTH);
        assert!(warnings.is_empty());

        let (project, warnings) = build(&nested_repeats(MAX_BRICK_DEPTH + 1));
        assert_eq!(nesting_depth(&project.scenes[0].objects[0].scripts[0].bricks), MAX_BRICK_DEPTH);
        assert_eq!(
            warnings,
            vec![Warning::BrickNestingTooDeep { brick: "RepeatBrick".into(), limit: MAX_BRICK_DEPTH }]
        );
    }

    #[test]
    fn test_very_deep_nesting_is_cut() {
        let (project, warnings) = build(&nested_repeats(20_000));
        assert_eq!(nesting_depth(&project.scenes[0].objects[0].scripts[0].bricks), MAX_BRICK_DEPTH);
        assert_eq!(warnings.len(), 1);
    }

    #[test]
    fn test_nested_branches() {
        let (project, _) = build(
            r#"<program><scenes><scene><name>S</name><objectList><object name="O"><scriptList>
                 <script type="StartScript"><brickList>
                   <brick type="IfLogicBeginBrick">
                     <formulaList><formula category="IF_CONDITION"><value>TRUE</value></formula></formulaList>
                     <ifBranchBricks><brick type="ShowBrick"/><brick type="WaitBrick"/></ifBranchBricks>
                     <elseBranchBricks><brick type="HideBrick"/></elseBranchBricks>
                   </brick>
                   <brick type="RepeatBrick"><loopBricks><brick type="TurnLeftBrick"/></loopBricks></brick>
                 </brickList></script>
               </scriptList></object></objectList></scene></scenes></program>"#,
        );
        let bricks = &project.scenes[0].objects[0].scripts[0].bricks;
        assert_eq!(bricks.len(), 2);
        assert_eq!(bricks[0].fields["IF_CONDITION"], "TRUE ");
        let body: Vec<_> = bricks[0].body.iter().map(|b| b.name.as_str()).collect();
        assert_eq!(body, ["ShowBrick", "WaitBrick"]);
        assert_eq!(bricks[0].else_body[0].name, "HideBrick");
        assert_eq!(bricks[1].body[0].name, "TurnLeftBrick");
    }

    #[test]
    fn test_fields_and_assets() {
        let (project, warnings) = build(
            r#"<program><scenes><scene><name>S</name><objectList><object name="O">
                 <lookList><look name="front" fileName="front.png"/></lookList>
                 <soundList><sound name="meow" fileName="meow.mp3"/></soundList>
                 <scriptList>
                   <script type="BroadcastScript"><receivedMessage>go</receivedMessage><brickList>
                     <brick type="PlaySoundBrick"><sound reference="../../../../../soundList/sound"/></brick>
                     <brick type="SetLookBrick"><look reference="../../../../../lookList/look"/></brick>
                     <brick type="SceneTransitionBrick"><sceneForTransition/></brick>
                     <brick type="SetLookBrick"><look reference="../../../../../lookList/look[3]"/></brick>
                   </brickList></script>
                 </scriptList></object></objectList></scene></scenes></program>"#,
        );
        let object = &project.scenes[0].objects[0];
        assert_eq!(object.sounds, vec![File::new(Some("meow".into()), Some("meow.mp3".into()))]);
        let script = &object.scripts[0];
        assert_eq!(script.fields["DROPDOWN"], "go");
        assert_eq!(script.bricks[0].fields["sound"], "meow");
        assert_eq!(script.bricks[1].fields["look"], "front");
        assert_eq!(script.bricks[2].fields["DROPDOWN"], "---");
        assert!(script.bricks[3].fields.is_empty());
        assert_eq!(
            warnings,
            vec![Warning::UnresolvedReference { path: "../../../../../lookList/look[3]".into() }]
        );
    }

    #[test]
    fn test_oversized_formula_and_huge_index() {
        let deep = format!("{}<value>0</value>{}", "<leftChild>".repeat(20_000), "</leftChild>".repeat(20_000));
        let (project, warnings) = build(&format!(
            r#"<program><scenes><scene><name>S</name><objectList><object name="O"><scriptList>
                 <script type="StartScript"><brickList>
                   <brick type="SetXBrick"><formulaList>
                     <formula category="X_POSITION">{deep}</formula>
                     <formula category="Y_POSITION"><value>5</value></formula>
                   </formulaList></brick>
                   <brick type="ChangeVariableBrick">
                     <userVariable reference="../../../brickList/brick[10000000000000000000]/userVariable"/>
                   </brick>
                 </brickList></script>
               </scriptList></object></objectList></scene></scenes></program>"#
        ));
        let bricks = &project.scenes[0].objects[0].scripts[0].bricks;
        assert!(!bricks[0].fields.contains_key("X_POSITION"));
        assert_eq!(bricks[0].fields["Y_POSITION"], "5 ");
        assert!(bricks[1].fields.is_empty());
        assert_eq!(
            warnings,
            vec![
                Warning::FormulaTooLarge { category: "X_POSITION".into(), limit: MAX_FORMULA_NODES },
                Warning::UnresolvedReference {
                    path: "../../../brickList/brick[10000000000000000000]/userVariable".into()
                },
            ]
        );
    }
}

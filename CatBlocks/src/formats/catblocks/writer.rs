//! SPDX-FileCopyrightText: 2026 `Catrobat`
//!
//! SPDX-License-Identifier: MIT
//!
//! Block-editor XML writing
//!
//! Sibling bricks are not written as a flat list: every brick after the
//! first is nested in a `<next>` inside its predecessor's `<block>`.

use crate::error::Result;
use crate::project::{Brick, FieldMap, Project, SceneObject, Script};
use quick_xml::Writer;
use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};
use std::fs;
use std::io::Write;
use std::path::Path;

/// Namespace of the `<xml>` envelope.
pub const XML_NAMESPACE: &str = "http://www.w3.org/1999/xhtml";

/// Statement name for loop bodies and if-branches.
pub const SUBSTACK: &str = "SUBSTACK";

/// Statement name for else-branches.
pub const SUBSTACK2: &str = "SUBSTACK2";

/// Output settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WriteOptions {
    /// Wrap output in `<xml>` with `<scene>`/`<object>` elements. Without it
    /// only `<script>` fragments are written.
    pub share: bool,
    /// Spaces per nesting level; `0` writes everything on one line.
    pub indent: usize,
}

impl Default for WriteOptions {
    fn default() -> Self {
        WriteOptions {
            share: false,
            indent: 2,
        }
    }
}

/// Write a project to disk
///
/// # Errors
/// Returns an error if serialization or file writing fails.
pub fn write_catblocks<P: AsRef<Path>>(project: &Project, path: P, options: &WriteOptions) -> Result<()> {
    let xml = serialize_catblocks(project, options)?;
    fs::write(path, xml)?;
    Ok(())
}

/// Serialize a project to block-editor XML
///
/// # Errors
/// Returns an error if XML serialization fails.
pub fn serialize_catblocks(project: &Project, options: &WriteOptions) -> Result<String> {
    let mut output = Vec::new();
    let mut writer = if options.indent == 0 {
        Writer::new(&mut output)
    } else {
        Writer::new_with_indent(&mut output, b' ', options.indent)
    };

    if options.share {
        let mut xml = BytesStart::new("xml");
        xml.push_attribute(("xmlns", XML_NAMESPACE));
        writer.write_event(Event::Start(xml))?;
    }

    for scene in &project.scenes {
        if options.share {
            let mut scene_tag = BytesStart::new("scene");
            scene_tag.push_attribute(("type", scene.name.as_str()));
            writer.write_event(Event::Start(scene_tag))?;
        }

        for object in &scene.objects {
            if options.share {
                writer.write_event(Event::Start(object_start(object)))?;
            }
            for script in &object.scripts {
                write_script(&mut writer, script)?;
            }
            if options.share {
                writer.write_event(Event::End(BytesEnd::new("object")))?;
            }
        }

        if options.share {
            writer.write_event(Event::End(BytesEnd::new("scene")))?;
        }
    }

    if options.share {
        writer.write_event(Event::End(BytesEnd::new("xml")))?;
    }

    Ok(String::from_utf8(output)?)
}

fn object_start(object: &SceneObject) -> BytesStart<'_> {
    let mut tag = BytesStart::new("object");
    tag.push_attribute(("type", object.name.as_str()));
    if let Some(look) = object.preview_look() {
        tag.push_attribute(("look", look));
    }
    tag
}

fn block_start(name: &str) -> BytesStart<'_> {
    let mut block = BytesStart::new("block");
    block.push_attribute(("type", name));
    block.push_attribute(("id", ""));
    block.push_attribute(("x", ""));
    block.push_attribute(("y", ""));
    block
}

fn write_script<W: Write>(writer: &mut Writer<W>, script: &Script) -> Result<()> {
    let mut script_tag = BytesStart::new("script");
    script_tag.push_attribute(("type", script.name.as_str()));
    writer.write_event(Event::Start(script_tag))?;

    writer.write_event(Event::Start(block_start(&script.name)))?;
    write_fields(writer, &script.fields)?;
    if !script.bricks.is_empty() {
        writer.write_event(Event::Start(BytesStart::new("next")))?;
        write_chain(writer, &script.bricks)?;
        writer.write_event(Event::End(BytesEnd::new("next")))?;
    }
    writer.write_event(Event::End(BytesEnd::new("block")))?;

    writer.write_event(Event::End(BytesEnd::new("script")))?;
    Ok(())
}

fn write_fields<W: Write>(writer: &mut Writer<W>, fields: &FieldMap) -> Result<()> {
    for (name, value) in fields {
        let mut field = BytesStart::new("field");
        field.push_attribute(("name", name.as_str()));
        writer.write_event(Event::Start(field))?;
        writer.write_event(Event::Text(BytesText::new(value)))?;
        writer.write_event(Event::End(BytesEnd::new("field")))?;
    }
    Ok(())
}

/// Writes `bricks[0]` with every later sibling nested in the previous one's
/// `<next>`. Open tags are closed in reverse once the chain is written, so
/// only branch nesting recurses.
fn write_chain<W: Write>(writer: &mut Writer<W>, bricks: &[Brick]) -> Result<()> {
    for (index, brick) in bricks.iter().enumerate() {
        if index > 0 {
            writer.write_event(Event::Start(BytesStart::new("next")))?;
        }
        writer.write_event(Event::Start(block_start(&brick.name)))?;
        write_fields(writer, &brick.fields)?;
        write_statement(writer, SUBSTACK, &brick.body)?;
        write_statement(writer, SUBSTACK2, &brick.else_body)?;
    }

    for index in (0..bricks.len()).rev() {
        writer.write_event(Event::End(BytesEnd::new("block")))?;
        if index > 0 {
            writer.write_event(Event::End(BytesEnd::new("next")))?;
        }
    }
    Ok(())
}

fn write_statement<W: Write>(writer: &mut Writer<W>, name: &str, bricks: &[Brick]) -> Result<()> {
    if bricks.is_empty() {
        return Ok(());
    }
    let mut statement = BytesStart::new("statement");
    statement.push_attribute(("name", name));
    writer.write_event(Event::Start(statement))?;
    write_chain(writer, bricks)?;
    writer.write_event(Event::End(BytesEnd::new("statement")))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::project::{File, Scene};
    use pretty_assertions::assert_eq;

    fn project() -> Project {
        let mut script = Script::new("StartScript");
        let mut repeat = Brick::new("RepeatBrick").with_field("TIMES_TO_REPEAT", "3 ");
        repeat.body.push(Brick::new("MoveNStepsBrick").with_field("STEPS", "10 "));
        script.bricks.push(repeat);
        script.bricks.push(Brick::new("HideBrick"));

        let mut object = SceneObject::new("Cat");
        object.looks.push(File::new(Some("cat".into()), Some("cat.png".into())));
        object.scripts.push(script);

        let mut scene = Scene::new("Scene 1");
        scene.objects.push(object);
        Project { version: Some("0.994".into()), scenes: vec![scene] }
    }

    #[test]
    fn test_fragment_output() {
        let options = WriteOptions { share: false, indent: 0 };
        let xml = serialize_catblocks(&project(), &options).unwrap();
        assert_eq!(
            xml,
            concat!(
                r#"<script type="StartScript">"#,
                r#"<block type="StartScript" id="" x="" y="">"#,
                "<next>",
                r#"<block type="RepeatBrick" id="" x="" y="">"#,
                r#"<field name="TIMES_TO_REPEAT">3 </field>"#,
                r#"<statement name="SUBSTACK">"#,
                r#"<block type="MoveNStepsBrick" id="" x="" y=""><field name="STEPS">10 </field></block>"#,
                "</statement>",
                "<next>",
                r#"<block type="HideBrick" id="" x="" y=""></block>"#,
                "</next>",
                "</block>",
                "</next>",
                "</block>",
                "</script>",
            )
        );
    }

    #[test]
    fn test_if_else_output() {
        let mut branch = Brick::new("IfLogicBeginBrick").with_field("IF_CONDITION", "1 SMALLER_THAN 2 ");
        branch.body.push(Brick::new("ShowBrick"));
        branch.body.push(Brick::new("WaitBrick"));
        branch.else_body.push(Brick::new("HideBrick"));
        let mut script = Script::new("WhenScript");
        script.bricks.push(branch);
        script.bricks.push(Brick::new("StopScriptBrick"));
        let mut object = SceneObject::new("Cat");
        object.scripts.push(script);
        let mut scene = Scene::new("S");
        scene.objects.push(object);
        let project = Project { version: None, scenes: vec![scene] };

        let xml = serialize_catblocks(&project, &WriteOptions { share: false, indent: 0 }).unwrap();
        assert_eq!(
            xml,
            concat!(
                r#"<script type="WhenScript">"#,
                r#"<block type="WhenScript" id="" x="" y="">"#,
                "<next>",
                r#"<block type="IfLogicBeginBrick" id="" x="" y="">"#,
                r#"<field name="IF_CONDITION">1 SMALLER_THAN 2 </field>"#,
                r#"<statement name="SUBSTACK">"#,
                r#"<block type="ShowBrick" id="" x="" y="">"#,
                r#"<next><block type="WaitBrick" id="" x="" y=""></block></next>"#,
                "</block>",
                "</statement>",
                r#"<statement name="SUBSTACK2">"#,
                r#"<block type="HideBrick" id="" x="" y=""></block>"#,
                "</statement>",
                r#"<next><block type="StopScriptBrick" id="" x="" y=""></block></next>"#,
                "</block>",
                "</next>",
                "</block>",
                "</script>",
            )
        );
    }

    #[test]
    fn test_share_envelope() {
        let options = WriteOptions { share: true, indent: 0 };
        let xml = serialize_catblocks(&project(), &options).unwrap();
        assert!(xml.starts_with(r#"<xml xmlns="http://www.w3.org/1999/xhtml"><scene type="Scene 1"><object type="Cat" look="cat.png"><script type="StartScript">"#));
        assert!(xml.ends_with("</script></object></scene></xml>"));
    }

    #[test]
    fn test_values_are_escaped() {
        let mut script = Script::new("BroadcastScript");
        script.fields.insert("DROPDOWN".into(), "a < b & c".into());
        let mut object = SceneObject::new("O");
        object.scripts.push(script);
        let mut scene = Scene::new("S");
        scene.objects.push(object);
        let project = Project { version: None, scenes: vec![scene] };

        let xml = serialize_catblocks(&project, &WriteOptions { share: false, indent: 0 }).unwrap();
        assert!(xml.contains(r#"<field name="DROPDOWN">a &lt; b &amp; c</field>"#));
    }

    #[test]
    fn test_write_to_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.xml");
        write_catblocks(&project(), &path, &WriteOptions::default()).unwrap();
        let written = fs::read_to_string(&path).unwrap();
        assert!(written.contains(r#"<statement name="SUBSTACK">"#));
    }
}

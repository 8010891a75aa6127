//! On-disk TwinCAT project fixtures.

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// A temporary PLC project directory.
pub struct ProjectDir {
    dir: TempDir,
}

impl ProjectDir {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("create temp dir"),
        }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Write `contents` to `relative`, creating parent directories.
    pub fn write(&self, relative: &str, contents: &str) -> PathBuf {
        let path = self.dir.path().join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("create parent dirs");
        }
        fs::write(&path, contents).expect("write fixture");
        path
    }
}

/// Wrap an object element in the `TcPlcObject` root.
pub fn tc_plc_object(inner: &str) -> String {
    format!(
        "<?xml version=\"1.0\" encoding=\"utf-8\"?>\n<TcPlcObject Version=\"1.1.0.1\" ProductVersion=\"3.1.4024.12\">\n{inner}\n</TcPlcObject>"
    )
}

pub fn method_xml(name: &str, declaration: &str, body: &str) -> String {
    format!(
        "<Method Name=\"{name}\">\n<Declaration><![CDATA[{declaration}]]></Declaration>\n<Implementation>\n<ST><![CDATA[{body}]]></ST>\n</Implementation>\n</Method>"
    )
}

pub fn property_xml(name: &str, declaration: &str, get: bool, set: bool) -> String {
    let accessor = |tag: &str| {
        format!(
            "<{tag} Name=\"{tag}\">\n<Declaration><![CDATA[VAR\nEND_VAR\n]]></Declaration>\n<Implementation>\n<ST><![CDATA[]]></ST>\n</Implementation>\n</{tag}>"
        )
    };
    let get = if get { accessor("Get") } else { String::new() };
    let set = if set { accessor("Set") } else { String::new() };
    format!(
        "<Property Name=\"{name}\">\n<Declaration><![CDATA[{declaration}]]></Declaration>\n{get}\n{set}\n</Property>"
    )
}

pub fn pou_xml(name: &str, declaration: &str, members: &[String]) -> String {
    tc_plc_object(&format!(
        "<POU Name=\"{name}\" SpecialFunc=\"None\">\n<Declaration><![CDATA[{declaration}]]></Declaration>\n<Implementation>\n<ST><![CDATA[]]></ST>\n</Implementation>\n{}\n</POU>",
        members.join("\n")
    ))
}

pub fn dut_xml(name: &str, declaration: &str) -> String {
    tc_plc_object(&format!(
        "<DUT Name=\"{name}\">\n<Declaration><![CDATA[{declaration}]]></Declaration>\n</DUT>"
    ))
}

pub fn itf_xml(name: &str, declaration: &str, members: &[String]) -> String {
    tc_plc_object(&format!(
        "<Itf Name=\"{name}\">\n<Declaration><![CDATA[{declaration}]]></Declaration>\n{}\n</Itf>",
        members.join("\n")
    ))
}

pub const FB_BASE_DECLARATION: &str = "FUNCTION_BLOCK FB_Base ABSTRACT PROTECTED EXTENDS FB_SubBase, FB_SubSubBase IMPLEMENTS I_Elementinformation, I_TestInterface
(*details Base of every module *)
VAR
\t_bEnable : BOOL;
END_VAR
VAR_INPUT PERSISTENT
\tbReset : BOOL;
END_VAR
";

pub const CONFIGURE_ALARM_DECLARATION: &str = "METHOD PRIVATE _ConfigureAlarm : BOOL
(*
\t@brief Configures the alarm of this module.
\t@returns TRUE when the alarm was configured.
*)
VAR_INPUT
\tnAlarmId : UDINT;
END_VAR
";

/// A small project: one function block with members, a struct, an enum and
/// an interface, spread over subdirectories.
pub fn sample_project() -> ProjectDir {
    let project = ProjectDir::new();
    project.write(
        "POUs/FB_Base.TcPOU",
        &pou_xml(
            "FB_Base",
            FB_BASE_DECLARATION,
            &[
                method_xml("_ConfigureAlarm", CONFIGURE_ALARM_DECLARATION, "_ConfigureAlarm := TRUE;"),
                method_xml("Execute", "METHOD PUBLIC ABSTRACT Execute", ""),
                property_xml(
                    "DesignationName",
                    "PROPERTY PUBLIC DesignationName : STRING(80)\n(*brief Name shown to the operator*)",
                    true,
                    false,
                ),
            ],
        ),
    );
    project.write(
        "POUs/Functions/F_Add.TcPOU",
        &pou_xml("F_Add", "FUNCTION F_Add : INT\nVAR_INPUT\n\ta, b : INT;\nEND_VAR", &[]),
    );
    project.write(
        "DUTs/ST_Data.TcDUT",
        &dut_xml("ST_Data", "TYPE ST_Data :\nSTRUCT\n\tnValue : INT;\nEND_STRUCT\nEND_TYPE"),
    );
    project.write(
        "DUTs/E_Mode.TcDUT",
        &dut_xml("E_Mode", "TYPE E_Mode :\n(\n\tIdle,\n\tRun\n);\nEND_TYPE"),
    );
    project.write(
        "ITFs/I_TestInterface.TcIO",
        &itf_xml(
            "I_TestInterface",
            "INTERFACE I_TestInterface EXTENDS __System.IQueryInterface",
            &[method_xml("Check", "METHOD Check : BOOL", "")],
        ),
    );
    project.write("PLC.plcproj", "<Project />");
    project
}

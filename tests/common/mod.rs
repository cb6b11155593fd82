use std::fs;
use std::path::{Path, PathBuf};

pub const PROJECT: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<projectDescription>
	<name>blinky</name>
	<linkedResources>
		<link>
			<name>Application/User/main.c</name>
			<type>1</type>
			<location>PARENT-1-PROJECT_LOC/Src/main.c</location>
		</link>
		<link>
			<name>Application/SW4STM32/startup_stm32f407xx.s</name>
			<type>1</type>
			<location>PARENT-2-PROJECT_LOC/startup/startup_stm32f407xx.s</location>
		</link>
		<link>
			<name>Doc/readme.txt</name>
			<type>1</type>
			<location>PARENT-1-PROJECT_LOC/readme.txt</location>
		</link>
	</linkedResources>
</projectDescription>
"#;

pub const CPROJECT: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="no"?>
<?fileVersion 4.0.0?><cproject storage_type_id="org.eclipse.cdt.core.XmlProjectDescriptionStorage">
	<storageModule moduleId="org.eclipse.cdt.core.settings">
		<cconfiguration id="fr.ac6.managedbuild.config.gnu.cross.exe.debug">
			<storageModule buildSystemId="org.eclipse.cdt.managedbuilder.core.configurationDataProvider" moduleId="cdtBuildSystem" version="4.0.0">
				<configuration artifactName="${ProjName}" name="Debug" parent="fr.ac6.managedbuild.config.gnu.cross.exe.debug">
					<folderInfo id="debug.folder" name="/" resourcePath="">
						<toolChain id="debug.toolchain" name="Ac6 STM32 MCU GCC">
							<option id="mcu" name="Mcu" superClass="fr.ac6.managedbuild.option.gnu.cross.mcu" value="STM32F407VG" valueType="string"/>
							<tool id="compiler" name="MCU GCC Compiler" superClass="fr.ac6.managedbuild.tool.gnu.cross.c.compiler">
								<option id="includes" superClass="gnu.c.compiler.option.include.paths" valueType="includePath">
									<listOptionValue builtIn="false" value="../Inc"/>
									<listOptionValue builtIn="false" value="../Drivers/STM32F4xx_HAL_Driver/Inc"/>
								</option>
								<option id="defs" superClass="gnu.c.compiler.option.preprocessor.def.symbols" valueType="definedSymbols">
									<listOptionValue builtIn="false" value="__weak=__attribute__((weak))"/>
								</option>
							</tool>
							<tool id="linker" name="MCU GCC Linker" superClass="fr.ac6.managedbuild.tool.gnu.cross.c.linker">
								<option id="script" superClass="fr.ac6.managedbuild.tool.gnu.cross.c.linker.script" value="../STM32F407VGTx_FLASH.ld" valueType="string"/>
								<option id="flags" superClass="gnu.c.link.option.ldflags" value="-specs=nosys.specs -specs=nano.specs" valueType="string"/>
							</tool>
						</toolChain>
					</folderInfo>
				</configuration>
			</storageModule>
		</cconfiguration>
	</storageModule>
</cproject>
"#;

pub fn template_path() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("templates/CubeMX2Makefile.tpl")
}

/// Lay out `<tmp>/<name>/{.project,.cproject}` and return the project folder.
pub fn write_project(tmp: &Path, name: &str, project: &str, cproject: &str) -> PathBuf {
    let dir = tmp.join(name);
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join(".project"), project).unwrap();
    fs::write(dir.join(".cproject"), cproject).unwrap();
    dir
}

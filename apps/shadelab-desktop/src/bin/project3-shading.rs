use shadelab_scene::Project;

fn main() -> anyhow::Result<()> {
    shadelab_desktop::run(Project::Shading)
}
